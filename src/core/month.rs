//! Per-month grouping and the totals the allocation engine is fed from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FinancialRecord, RecordKind};

use super::dates::MonthKey;

/// Income and spending totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Net income, excluding the gas bonus.
    pub income: f64,
    /// Spending, excluding gas.
    pub spent: f64,
    pub net: f64,
    /// Gas bonus actually recorded this month.
    pub gas_bonus_net: f64,
    pub gas_spent: f64,
}

impl MonthTotals {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FinancialRecord>,
    {
        let mut totals = MonthTotals::default();
        for record in records {
            let amount = if record.amount.is_finite() {
                record.amount
            } else {
                0.0
            };
            match record.kind {
                RecordKind::Income if record.is_gas_bonus() => totals.gas_bonus_net += amount,
                RecordKind::Income => totals.income += amount,
                RecordKind::Spent if record.is_gas_spend() => totals.gas_spent += amount,
                RecordKind::Spent => totals.spent += amount,
            }
        }
        totals.net = totals.income - totals.spent;
        totals
    }
}

/// Groups records by calendar month, newest month first and newest entry
/// first within each month.
pub fn records_by_month<'a, I>(records: I) -> Vec<(MonthKey, Vec<FinancialRecord>)>
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut grouped: BTreeMap<MonthKey, Vec<FinancialRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.month()).or_default().push(record.clone());
    }
    grouped
        .into_iter()
        .rev()
        .map(|(month, mut entries)| {
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            (month, entries)
        })
        .collect()
}

/// Selects records for history listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring over label, category, description and date.
    pub search: Option<String>,
    /// Month to hide, typically the current one.
    pub exclude_month: Option<MonthKey>,
    pub include_gas_bonus: bool,
}

impl RecordFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn excluding_month(mut self, month: MonthKey) -> Self {
        self.exclude_month = Some(month);
        self
    }

    pub fn with_gas_bonus(mut self) -> Self {
        self.include_gas_bonus = true;
        self
    }

    pub fn matches(&self, record: &FinancialRecord) -> bool {
        if self.exclude_month == Some(record.month()) {
            return false;
        }
        if record.is_gas_bonus() && !self.include_gas_bonus {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                record.search_text().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, records: &'a [FinancialRecord]) -> Vec<&'a FinancialRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}
