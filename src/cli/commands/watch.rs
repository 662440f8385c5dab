use anyhow::{Context, Result};

use super::{finish_watch, CommandContext};
use crate::cli::sink::ConsoleSink;
use crate::cli::types::JobArgs;

/// Handle the watch command
///
/// Finding no active build is not an error.
pub async fn execute(ctx: &CommandContext, args: JobArgs) -> Result<()> {
    let job = ctx.job(args.job)?;

    let mut sink = ConsoleSink::new(ctx.json);
    let status = ctx
        .service
        .watch(&job, &mut sink, &ctx.cancel)
        .await
        .with_context(|| format!("Failed to watch {job}"))?;

    if sink.reported_no_active_build() {
        if ctx.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "job": job,
                    "active": false,
                    "last": status.last,
                }))?
            );
        }
        return Ok(());
    }
    drop(sink);

    finish_watch(ctx, &job, &status)
}
