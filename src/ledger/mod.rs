//! In-memory ledger: monthly series, allocation policy, and the record entry point.

pub mod allocation;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod series;

pub use allocation::{Allocation, AllocationPolicy, CHARITY_RATE, SAVINGS_RATE};
pub use ledger::{CategoryBook, Ledger, RecordOutcome};
pub use series::MonthlySeries;
