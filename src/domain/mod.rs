pub mod category;
pub mod month;
pub mod transaction;

pub use category::{Category, Subcategory};
pub use month::{Month, MONTHS_PER_YEAR};
pub use transaction::{EntryLabel, RecordRequest, SourceType, Transaction};
