//! Adapters that satisfy the domain ports without a real CI server.

pub mod mock;

pub use mock::{MockCiServer, RecordingSink, SinkEvent};
