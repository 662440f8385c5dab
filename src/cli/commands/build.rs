use anyhow::{Context, Result};
use serde::Serialize;

use super::{finish_watch, CommandContext};
use crate::cli::display::{action_success, output, CommandOutput};
use crate::cli::sink::ConsoleSink;
use crate::cli::types::BuildArgs;

#[derive(Debug, Serialize)]
pub struct TriggerOutput {
    pub job: String,
    pub queue_url: Option<String>,
}

impl CommandOutput for TriggerOutput {
    fn to_human(&self) -> String {
        match &self.queue_url {
            Some(url) => action_success(&format!("Build of {} requested ({url})", self.job)),
            None => action_success(&format!("Build of {} requested", self.job)),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Handle the build command
pub async fn execute(ctx: &CommandContext, args: BuildArgs) -> Result<()> {
    let job = ctx.job(args.target.job)?;

    if args.no_watch {
        let receipt = ctx
            .service
            .trigger(&job)
            .await
            .with_context(|| format!("Failed to trigger a build of {job}"))?;
        output(
            &TriggerOutput {
                job,
                queue_url: receipt.queue_url,
            },
            ctx.json,
        );
        return Ok(());
    }

    let mut sink = ConsoleSink::new(ctx.json);
    let status = ctx
        .service
        .build(&job, &mut sink, &ctx.cancel)
        .await
        .with_context(|| format!("Failed to build {job}"))?;
    drop(sink);

    finish_watch(ctx, &job, &status)
}
