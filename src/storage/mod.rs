pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{
    core::dates::MonthKey,
    domain::{
        normalize_records, FinancialRecord, Identifiable, RawRecord, RejectedRecord,
        SubscriptionRecord,
    },
    errors::{LedgerError, Result},
};

/// Persistence for records and subscriptions. Services receive a store
/// explicitly; the allocation core never sees one.
pub trait RecordStore: Send + Sync {
    fn records(&self) -> Result<Vec<FinancialRecord>>;
    fn add_record(&mut self, record: FinancialRecord) -> Result<Uuid>;
    /// Removes the record with `id`, failing with `RecordNotFound` if absent.
    fn delete_record(&mut self, id: Uuid) -> Result<FinancialRecord>;

    fn subscriptions(&self) -> Result<Vec<SubscriptionRecord>>;
    fn add_subscription(&mut self, subscription: SubscriptionRecord) -> Result<Uuid>;
    fn delete_subscription(&mut self, id: Uuid) -> Result<SubscriptionRecord>;

    fn records_for_month(&self, month: MonthKey) -> Result<Vec<FinancialRecord>> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|record| record.month() == month)
            .collect())
    }

    /// Normalizes and stores a batch of raw submissions. Records with an
    /// unparseable date are skipped and handed back.
    fn import(&mut self, raws: Vec<RawRecord>) -> Result<Vec<RejectedRecord>> {
        let (accepted, rejected) = normalize_records(raws);
        for record in accepted {
            self.add_record(record)?;
        }
        Ok(rejected)
    }
}

/// Removes the item with `id` from `items`.
pub(crate) fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> Result<T> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(LedgerError::RecordNotFound(id))?;
    Ok(items.remove(index))
}

pub use json_backend::{JsonRecordStore, StoreDocument};
pub use memory::InMemoryRecordStore;
