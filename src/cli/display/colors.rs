//! Outcome color mapping for CLI output.
//!
//! Coloring goes through `console`, which honors `NO_COLOR` and disables
//! styling when the stream is not a terminal.

use console::{style, StyledObject};

use crate::domain::models::{CurrentOutcome, Outcome};

/// Colored rendering of a completed-build outcome.
pub fn colorize_outcome(outcome: Outcome) -> StyledObject<&'static str> {
    let text = outcome.as_str();
    match outcome {
        Outcome::Passing => style(text).green().bold(),
        Outcome::Failing => style(text).red().bold(),
        Outcome::Canceled => style(text).dim(),
        Outcome::Unknown => style(text).white(),
    }
}

/// Colored rendering of the most recent build's outcome.
pub fn colorize_current(current: CurrentOutcome) -> StyledObject<&'static str> {
    match current {
        CurrentOutcome::Running => style(current.as_str()).yellow(),
        CurrentOutcome::Passing => colorize_outcome(Outcome::Passing),
        CurrentOutcome::Failing => colorize_outcome(Outcome::Failing),
        CurrentOutcome::Canceled => colorize_outcome(Outcome::Canceled),
        CurrentOutcome::Unknown => colorize_outcome(Outcome::Unknown),
    }
}
