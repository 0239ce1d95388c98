pub mod action;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod format;
pub mod gauge;
pub mod logging;
pub mod metrics;
pub mod refresh;
pub mod table;
pub mod ui;
