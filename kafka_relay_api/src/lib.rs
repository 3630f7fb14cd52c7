pub mod api;
pub mod app_config;
pub mod error;
pub mod signal;
pub mod startup;
pub mod telemetry;
