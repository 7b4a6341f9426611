//! Recurring subscription charges.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::dates::parse_subscription_due_date;

use super::common::{Amounted, Identifiable};

/// Billing frequency. Cadences other than monthly and yearly are kept but
/// contribute to neither total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Cadence {
    Monthly,
    Yearly,
    Unsupported,
}

impl Cadence {
    /// Case-insensitive parse; anything unrecognised is [`Cadence::Unsupported`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Cadence::Monthly,
            "yearly" => Cadence::Yearly,
            _ => Cadence::Unsupported,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Cadence::Monthly => "Monthly",
            Cadence::Yearly => "Yearly",
            Cadence::Unsupported => "Unsupported",
        };
        f.write_str(label)
    }
}

/// Subscription as supplied by an external source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSubscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub cadence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionRecord {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub cadence: Cadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl SubscriptionRecord {
    pub fn new(name: impl Into<String>, amount: f64, cadence: Cadence) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            cadence,
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Never fails: an unparseable due date becomes `None`.
    pub fn from_raw(raw: RawSubscription) -> Self {
        Self {
            id: raw.id.unwrap_or_else(Uuid::new_v4),
            name: raw.name,
            amount: raw.amount,
            cadence: Cadence::parse(&raw.cadence),
            due_date: raw.due_date.as_deref().and_then(parse_subscription_due_date),
        }
    }
}

impl Identifiable for SubscriptionRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for SubscriptionRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}
