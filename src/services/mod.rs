//! Service layer: status resolution, live tail and build orchestration.

pub mod build_service;
pub mod live_tail;
pub mod status_resolver;

pub use build_service::{BuildService, BuildVerdict};
pub use live_tail::{LiveTail, TailSettings, LOG_LINE_CAP};
pub use status_resolver::resolve;
