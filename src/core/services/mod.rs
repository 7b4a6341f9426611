//! Orchestration over the pure core. These are the only core entry points
//! that accept a [`RecordStore`](crate::storage::RecordStore) handle.

pub mod budget_service;
pub mod gas_bonus_service;

pub use budget_service::{BudgetService, MonthHistory, MonthlyBudget};
pub use gas_bonus_service::GasBonusService;
