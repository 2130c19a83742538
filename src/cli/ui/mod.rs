pub mod chart;
pub mod formatting;
pub mod table;
