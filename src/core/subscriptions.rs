//! Monthly and yearly subscription totals for a month.

use serde::{Deserialize, Serialize};

use crate::domain::{common::sum_amounts, Cadence, SubscriptionRecord};

use super::dates::{end_of_month, MonthKey};

/// A monthly subscription counts toward `month` when it has no due date or
/// its due date falls on or before the month's last instant. Yearly and
/// unsupported cadences are never active here.
pub fn is_active_for_month(subscription: &SubscriptionRecord, month: MonthKey) -> bool {
    if subscription.cadence != Cadence::Monthly {
        return false;
    }
    let Some(due_date) = subscription.due_date else {
        return true;
    };
    match (due_date.and_hms_opt(0, 0, 0), end_of_month(month.year, month.month)) {
        (Some(due), Some(month_end)) => due <= month_end,
        _ => false,
    }
}

pub fn monthly_total(subscriptions: &[SubscriptionRecord], month: MonthKey) -> f64 {
    sum_amounts(
        subscriptions
            .iter()
            .filter(|sub| is_active_for_month(sub, month)),
    )
}

/// Sum of every yearly subscription, regardless of due date.
pub fn yearly_total(subscriptions: &[SubscriptionRecord]) -> f64 {
    sum_amounts(
        subscriptions
            .iter()
            .filter(|sub| sub.cadence == Cadence::Yearly),
    )
}

/// Both subscription totals for one month. Zero totals are kept; hiding
/// empty rows is left to whoever renders them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionTotals {
    pub monthly: f64,
    pub yearly: f64,
}

impl SubscriptionTotals {
    pub fn for_month(subscriptions: &[SubscriptionRecord], month: MonthKey) -> Self {
        Self {
            monthly: monthly_total(subscriptions, month),
            yearly: yearly_total(subscriptions),
        }
    }
}
