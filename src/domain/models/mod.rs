//! Domain models.

pub mod build_status;
pub mod config;
pub mod job;

pub use build_status::{BuildStatus, CurrentOutcome, Eta, Outcome, WatchMode};
pub use config::{Config, LogFormat, LoggingConfig, RotationPolicy, ServerConfig, WatchConfig};
pub use job::{BuildNumber, JobSnapshot, TriggerReceipt};
