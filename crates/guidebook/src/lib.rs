pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod telemetry;
