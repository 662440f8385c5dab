//! jobwatch - command-line client for Jenkins
//!
//! Triggers builds, tails their console output live until they finish, and
//! syncs job configuration documents.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): build status models, errors and ports
//! - **Service Layer** (`services`): status resolution, live tail, build orchestration
//! - **Infrastructure Layer** (`infrastructure`): Jenkins client, clocks, config, logging
//! - **Adapters** (`adapters`): in-memory CI server and recording sink
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use jobwatch::services::resolve;
//! use jobwatch::{JobSnapshot, WatchMode};
//!
//! let snapshot = JobSnapshot {
//!     last_completed_build: Some(5),
//!     last_successful_build: Some(5),
//!     last_build: Some(5),
//!     ..Default::default()
//! };
//! let status = resolve(&snapshot, WatchMode::AlreadyRunning);
//! assert!(!status.running);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    BuildNumber, BuildStatus, Config, CurrentOutcome, Eta, JobSnapshot, Outcome, WatchMode,
};
pub use domain::ports::{CiServer, Clock, StatusSink};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{BuildService, BuildVerdict, LiveTail, TailSettings};
