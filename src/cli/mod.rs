pub mod breakdown;
pub mod rates;
pub mod summary;
pub mod ui;
