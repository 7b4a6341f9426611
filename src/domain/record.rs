//! Dated income and spending entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::core::{
    classifier::{classify_gas, GAS_CATEGORY},
    dates::{format_record_date, parse_record_date, MonthKey},
};
use crate::errors::{LedgerError, Result};

use super::common::{Amounted, Identifiable};

/// Job label of the recurring gas bonus income entry.
pub const GAS_BONUS_JOB: &str = "GasBonus";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Income,
    Spent,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Income => "Income",
            RecordKind::Spent => "Spent",
        };
        f.write_str(label)
    }
}

/// Record as submitted by a user or read from an external source, before
/// the date has been validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub kind: RecordKind,
    #[serde(default)]
    pub job: String,
    pub amount: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A validated income or spending entry. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialRecord {
    pub id: Uuid,
    pub kind: RecordKind,
    pub job: String,
    pub amount: f64,
    #[serde(with = "record_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl FinancialRecord {
    pub fn income(job: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: RecordKind::Income,
            job: job.into(),
            amount,
            date,
            description: None,
            category: None,
        }
    }

    /// Creates a spending record, classifying it as gas where applicable.
    pub fn spent(amount: f64, date: NaiveDate, description: Option<String>) -> Self {
        let category = classify_gas(description.as_deref(), None);
        Self {
            id: Uuid::new_v4(),
            kind: RecordKind::Spent,
            job: String::new(),
            amount,
            date,
            description,
            category: Some(category.to_string()),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validates a raw submission. Spending is classified for gas and the gas
    /// bonus income entry is tagged with the gas category.
    ///
    /// Fails with `InvalidDate` for a date other than `M/D/YYYY` and with
    /// `InvalidInput` for a negative or non-finite amount.
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        if !raw.amount.is_finite() || raw.amount < 0.0 {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be a non-negative number, got {}",
                raw.amount
            )));
        }
        let date = parse_record_date(&raw.date)?;
        let category = match raw.kind {
            RecordKind::Spent => Some(
                classify_gas(raw.description.as_deref(), raw.category.as_deref()).to_string(),
            ),
            RecordKind::Income if raw.job == GAS_BONUS_JOB => Some(GAS_CATEGORY.to_string()),
            RecordKind::Income => raw.category,
        };
        Ok(Self {
            id: raw.id.unwrap_or_else(Uuid::new_v4),
            kind: raw.kind,
            job: raw.job,
            amount: raw.amount,
            date,
            description: raw.description,
            category,
        })
    }

    pub fn is_gas_bonus(&self) -> bool {
        self.kind == RecordKind::Income && self.job == GAS_BONUS_JOB
    }

    pub fn is_gas_spend(&self) -> bool {
        self.kind == RecordKind::Spent && self.category.as_deref() == Some(GAS_CATEGORY)
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// Label shown for the entry; the gas bonus job reads "Gas Bonus".
    pub fn display_label(&self) -> String {
        if self.job == GAS_BONUS_JOB {
            "Gas Bonus".into()
        } else {
            self.job.clone()
        }
    }

    /// Text searched by history filters: label, category, description, date.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.display_label(),
            self.category.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            format_record_date(self.date)
        )
        .to_lowercase()
    }
}

impl Identifiable for FinancialRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for FinancialRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// A raw submission excluded from aggregation, with the reason.
#[derive(Debug)]
pub struct RejectedRecord {
    pub raw: RawRecord,
    pub error: LedgerError,
}

/// Validates a batch, excluding (rather than failing on) records with an
/// unparseable date or an invalid amount.
pub fn normalize_records<I>(raws: I) -> (Vec<FinancialRecord>, Vec<RejectedRecord>)
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for raw in raws {
        match FinancialRecord::from_raw(raw.clone()) {
            Ok(record) => accepted.push(record),
            Err(error) => {
                warn!("excluding {} record `{}`: {}", raw.kind, raw.job, error);
                rejected.push(RejectedRecord { raw, error });
            }
        }
    }
    (accepted, rejected)
}

/// Serializes record dates in the `M/D/YYYY` layout users enter.
pub(crate) mod record_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::core::dates::{format_record_date, parse_record_date};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_record_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_record_date(&raw).map_err(D::Error::custom)
    }
}
