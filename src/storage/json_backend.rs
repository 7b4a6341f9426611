use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::{FinancialRecord, SubscriptionRecord},
    errors::Result,
    utils::{self, write_atomic},
};

use super::{remove_by_id, RecordStore};

/// On-disk layout of the store: one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub records: Vec<FinancialRecord>,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionRecord>,
}

/// Record store backed by a single JSON file. The document is loaded once
/// and rewritten after every change; the in-memory copy only changes once
/// the write has succeeded.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonRecordStore {
    /// Opens the store at `path`; a missing file starts empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        let document = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            StoreDocument::default()
        };
        debug!(
            "opened record store {} ({} records, {} subscriptions)",
            path.display(),
            document.records.len(),
            document.subscriptions.len()
        );
        Ok(Self { path, document })
    }

    /// Store at `~/.monthly_split/records.json` (or `$MONTHLY_SPLIT_HOME`).
    pub fn default_location() -> Result<Self> {
        Self::new(utils::store_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `document` to disk, then adopts it.
    fn commit(&mut self, document: StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(&document)?;
        write_atomic(&self.path, &json)?;
        self.document = document;
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn records(&self) -> Result<Vec<FinancialRecord>> {
        Ok(self.document.records.clone())
    }

    fn add_record(&mut self, record: FinancialRecord) -> Result<Uuid> {
        let id = record.id;
        let mut document = self.document.clone();
        document.records.push(record);
        self.commit(document)?;
        Ok(id)
    }

    fn delete_record(&mut self, id: Uuid) -> Result<FinancialRecord> {
        let mut document = self.document.clone();
        let removed = remove_by_id(&mut document.records, id)?;
        self.commit(document)?;
        info!("deleted {} record {}", removed.kind, id);
        Ok(removed)
    }

    fn subscriptions(&self) -> Result<Vec<SubscriptionRecord>> {
        Ok(self.document.subscriptions.clone())
    }

    fn add_subscription(&mut self, subscription: SubscriptionRecord) -> Result<Uuid> {
        let id = subscription.id;
        let mut document = self.document.clone();
        document.subscriptions.push(subscription);
        self.commit(document)?;
        Ok(id)
    }

    fn delete_subscription(&mut self, id: Uuid) -> Result<SubscriptionRecord> {
        let mut document = self.document.clone();
        let removed = remove_by_id(&mut document.subscriptions, id)?;
        self.commit(document)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cadence;
    use crate::errors::LedgerError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_in_temp_dir() -> (JsonRecordStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonRecordStore::new(temp.path().join("records.json")).expect("json store");
        (store, temp)
    }

    #[test]
    fn records_survive_reopen() {
        let (mut store, guard) = store_in_temp_dir();
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let id = store
            .add_record(FinancialRecord::income("Cafe", 640.5, date))
            .expect("add record");
        store
            .add_subscription(SubscriptionRecord::new("Phone", 30.0, Cadence::Monthly))
            .expect("add subscription");

        let reopened = JsonRecordStore::new(guard.path().join("records.json")).expect("reopen");
        let records = reopened.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].date, date);
        assert_eq!(reopened.subscriptions().unwrap().len(), 1);
        assert!(!guard.path().join("records.json.tmp").exists());
    }

    #[test]
    fn deleting_unknown_record_fails() {
        let (mut store, _guard) = store_in_temp_dir();
        let err = store.delete_record(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LedgerError::RecordNotFound(_)));
    }

    #[test]
    fn dates_are_written_month_first() {
        let (mut store, guard) = store_in_temp_dir();
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        store
            .add_record(FinancialRecord::spent(12.0, date, Some("lunch".into())))
            .unwrap();
        let raw = fs::read_to_string(guard.path().join("records.json")).unwrap();
        assert!(raw.contains("\"3/2/2024\""), "{raw}");
    }

    #[test]
    fn failed_writes_leave_the_store_unchanged() {
        let (mut store, guard) = store_in_temp_dir();
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let kept = store
            .add_record(FinancialRecord::income("Cafe", 100.0, date))
            .unwrap();
        let sub = store
            .add_subscription(SubscriptionRecord::new("Phone", 30.0, Cadence::Monthly))
            .unwrap();

        fs::create_dir_all(utils::tmp_path(&guard.path().join("records.json"))).unwrap();
        assert!(store
            .add_record(FinancialRecord::income("Cafe", 5.0, date))
            .is_err());
        assert!(store.delete_record(kept).is_err());
        assert!(store
            .add_subscription(SubscriptionRecord::new("Domain", 12.0, Cadence::Yearly))
            .is_err());
        assert!(store.delete_subscription(sub).is_err());

        let records = store.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, kept);
        assert_eq!(store.subscriptions().unwrap().len(), 1);
    }
}
