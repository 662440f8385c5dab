//! Jenkins transport behind the CI server port.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{JenkinsClient, JenkinsClientConfig};
pub use errors::JenkinsApiError;
