use uuid::Uuid;

use crate::{
    domain::{FinancialRecord, SubscriptionRecord},
    errors::Result,
};

use super::{remove_by_id, RecordStore};

/// Volatile store, mainly for tests and one-off computations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Vec<FinancialRecord>,
    subscriptions: Vec<SubscriptionRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<FinancialRecord>) -> Self {
        Self {
            records,
            subscriptions: Vec::new(),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn records(&self) -> Result<Vec<FinancialRecord>> {
        Ok(self.records.clone())
    }

    fn add_record(&mut self, record: FinancialRecord) -> Result<Uuid> {
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    fn delete_record(&mut self, id: Uuid) -> Result<FinancialRecord> {
        remove_by_id(&mut self.records, id)
    }

    fn subscriptions(&self) -> Result<Vec<SubscriptionRecord>> {
        Ok(self.subscriptions.clone())
    }

    fn add_subscription(&mut self, subscription: SubscriptionRecord) -> Result<Uuid> {
        let id = subscription.id;
        self.subscriptions.push(subscription);
        Ok(id)
    }

    fn delete_subscription(&mut self, id: Uuid) -> Result<SubscriptionRecord> {
        remove_by_id(&mut self.subscriptions, id)
    }
}
