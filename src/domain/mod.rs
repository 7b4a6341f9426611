//! Plain data: records as stored, subscriptions, and derived allocation views.

pub mod allocation;
pub mod common;
pub mod record;
pub mod subscription;

pub use allocation::{
    Allocation, Bucket, BucketShare, BucketValues, BudgetRow, Summary, SummaryRow,
};
pub use common::{Amounted, Identifiable};
pub use record::{
    normalize_records, FinancialRecord, RawRecord, RecordKind, RejectedRecord, GAS_BONUS_JOB,
};
pub use subscription::{Cadence, RawSubscription, SubscriptionRecord};
