#![doc(test(attr(deny(warnings))))]

//! Monthly Split records income and spending events and derives a recommended
//! allocation of each month's net income across savings and spending buckets.
//!
//! The computational core ([`core::allocation`], [`core::subscriptions`],
//! [`core::reconcile`]) is pure and accepts plain data only. Persistence lives
//! behind [`storage::RecordStore`] and never reaches the core.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use errors::{LedgerError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Monthly Split tracing initialized.");
    });
}
