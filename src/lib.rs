#![doc(test(attr(deny(warnings))))]

//! fintrack keeps a twelve-month personal finance ledger in memory: monthly
//! totals per category and subcategory, automatic savings and charity
//! allocation from income, and a transaction history that always reconciles
//! with those totals.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod tips;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("fintrack tracing initialized.");
    });
}
