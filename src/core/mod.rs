//! Pure computations over plain data: date handling, gas classification, the
//! allocation engine, subscription totals and summary reconciliation.

pub mod allocation;
pub mod classifier;
pub mod dates;
pub mod month;
pub mod reconcile;
pub mod services;
pub mod subscriptions;
pub mod time;

pub use allocation::AllocationEngine;
pub use dates::MonthKey;
pub use month::{MonthTotals, RecordFilter};
pub use subscriptions::SubscriptionTotals;
pub use time::{Clock, FixedClock, SystemClock};
