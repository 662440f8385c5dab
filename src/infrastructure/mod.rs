//! Infrastructure layer module
//!
//! Concrete implementations of the domain ports and process-wide concerns:
//! - Jenkins HTTP client
//! - Clocks (tokio-backed and manual)
//! - Configuration management
//! - Logging infrastructure

pub mod clock;
pub mod config;
pub mod jenkins;
pub mod logging;
