//! Build number and time formatters for CLI output.

use chrono::{DateTime, TimeZone, Utc};
use chrono_humanize::HumanTime;

use crate::domain::models::{BuildNumber, Eta};

/// Shown when a queued build has no usable start estimate.
pub const INFINITY: &str = "\u{221e}";

/// Format an optional build number as `#42` or `-`.
pub fn build_label(build: Option<BuildNumber>) -> String {
    build.map_or_else(|| "-".to_string(), |number| format!("#{number}"))
}

/// Human-relative rendering of a queue ETA ("in 2 minutes").
///
/// Unknown estimates and estimates already in the past render as `∞`.
pub fn format_eta(eta: Eta, now: DateTime<Utc>) -> String {
    match eta {
        Eta::Immediate => "now".to_string(),
        Eta::Unknown => INFINITY.to_string(),
        Eta::At(millis) => match Utc.timestamp_millis_opt(millis).single() {
            Some(at) if at > now => HumanTime::from(at - now).to_string(),
            _ => INFINITY.to_string(),
        },
    }
}

/// Format a count with label: "1 line", "3 lines".
pub fn count_label(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}
