//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the services depend on:
//! - CiServer: job snapshots, build logs, triggers and job configuration
//! - Clock: time source and fixed-delay timer for the polling loop
//! - StatusSink: line-oriented presentation of tailed logs and status updates
//!
//! These traits keep the status classification and live tail logic
//! independent of HTTP, the tokio timer, and the terminal.

pub mod ci_server;
pub mod clock;
pub mod status_sink;

pub use ci_server::CiServer;
pub use clock::Clock;
pub use status_sink::StatusSink;
