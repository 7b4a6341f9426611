#![allow(dead_code)]

use chrono::NaiveDate;
use monthly_split::{
    domain::{Cadence, FinancialRecord, RawRecord, RecordKind, SubscriptionRecord, GAS_BONUS_JOB},
    storage::JsonRecordStore,
};
use tempfile::TempDir;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn raw_income(job: &str, amount: f64, date: &str) -> RawRecord {
    RawRecord {
        id: None,
        kind: RecordKind::Income,
        job: job.into(),
        amount,
        date: date.into(),
        description: None,
        category: None,
    }
}

pub fn raw_spent(amount: f64, date: &str, description: &str) -> RawRecord {
    RawRecord {
        id: None,
        kind: RecordKind::Spent,
        job: String::new(),
        amount,
        date: date.into(),
        description: Some(description.into()),
        category: None,
    }
}

/// Two months of entries: a full March with a recorded gas bonus and a
/// shorter February without one.
pub fn sample_records() -> Vec<FinancialRecord> {
    vec![
        FinancialRecord::income("Cafe", 1800.0, date(2024, 3, 1)),
        FinancialRecord::income("Tutoring", 700.0, date(2024, 3, 22)),
        FinancialRecord::income(GAS_BONUS_JOB, 91.84, date(2024, 3, 16)).with_category("Gas"),
        FinancialRecord::spent(61.84, date(2024, 3, 9), Some("Shell gas".into())),
        FinancialRecord::spent(240.0, date(2024, 3, 12), Some("Groceries".into())),
        FinancialRecord::income("Cafe", 1500.0, date(2024, 2, 2)),
        FinancialRecord::spent(80.0, date(2024, 2, 20), Some("Dinner".into())),
    ]
}

pub fn sample_subscriptions() -> Vec<SubscriptionRecord> {
    vec![
        SubscriptionRecord::new("Phone", 30.0, Cadence::Monthly),
        SubscriptionRecord::new("Streaming", 15.49, Cadence::Monthly)
            .with_due_date(date(2024, 3, 15)),
        SubscriptionRecord::new("Domain", 12.0, Cadence::Yearly),
    ]
}

/// JSON store in a fresh temporary directory. Keep the guard alive for the
/// duration of the test.
pub fn temp_store() -> (JsonRecordStore, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let store =
        JsonRecordStore::new(temp.path().join("records.json")).expect("create json store");
    (store, temp)
}
