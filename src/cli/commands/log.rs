use anyhow::{Context, Result};
use serde::Serialize;

use super::CommandContext;
use crate::cli::display::{output, CommandOutput};
use crate::cli::types::LogArgs;
use crate::domain::models::BuildNumber;

#[derive(Debug, Serialize)]
pub struct LogOutput {
    pub job: String,
    pub build: Option<BuildNumber>,
    pub log: String,
}

impl CommandOutput for LogOutput {
    fn to_human(&self) -> String {
        self.log.trim_end_matches('\n').to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Handle the log command
pub async fn execute(ctx: &CommandContext, args: LogArgs) -> Result<()> {
    let job = ctx.job(args.target.job)?;
    let log = ctx
        .service
        .log(&job, args.build)
        .await
        .with_context(|| format!("Failed to fetch the log of {job}"))?;
    output(
        &LogOutput {
            job,
            build: args.build,
            log,
        },
        ctx.json,
    );
    Ok(())
}
