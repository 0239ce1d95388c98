pub mod collector;
pub mod history;
pub mod rates;
pub mod report;
pub mod snapshot;
