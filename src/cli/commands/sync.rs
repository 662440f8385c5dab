//! `pull` and `push` of a job's configuration document.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use super::CommandContext;
use crate::cli::display::{action_success, count_label, output, CommandOutput};
use crate::cli::types::SyncArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Pull,
    Push,
}

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub job: String,
    pub direction: Direction,
    pub path: PathBuf,
    pub bytes: usize,
}

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        let size = count_label(self.bytes, "byte", "bytes");
        let message = match self.direction {
            Direction::Pull => format!(
                "Saved configuration of {} to {} ({size})",
                self.job,
                self.path.display()
            ),
            Direction::Push => format!(
                "Uploaded {} as configuration of {} ({size})",
                self.path.display(),
                self.job
            ),
        };
        action_success(&message)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn target(ctx: &CommandContext, args: SyncArgs) -> Result<(String, PathBuf)> {
    let job = ctx.job(args.target.job)?;
    let path = args.file.unwrap_or_else(|| ctx.config.config_file.clone());
    Ok((job, path))
}

/// Handle the pull command
pub async fn pull(ctx: &CommandContext, args: SyncArgs) -> Result<()> {
    let (job, path) = target(ctx, args)?;
    let document = ctx
        .server
        .get_config(&job)
        .await
        .with_context(|| format!("Failed to download the configuration of {job}"))?;
    tokio::fs::write(&path, &document)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(job, path = %path.display(), bytes = document.len(), "pulled job configuration");

    output(
        &SyncOutput {
            job,
            direction: Direction::Pull,
            path,
            bytes: document.len(),
        },
        ctx.json,
    );
    Ok(())
}

/// Handle the push command
pub async fn push(ctx: &CommandContext, args: SyncArgs) -> Result<()> {
    let (job, path) = target(ctx, args)?;
    let document = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ctx.server
        .put_config(&job, &document)
        .await
        .with_context(|| format!("Failed to upload the configuration of {job}"))?;
    info!(job, path = %path.display(), bytes = document.len(), "pushed job configuration");

    output(
        &SyncOutput {
            job,
            direction: Direction::Push,
            path,
            bytes: document.len(),
        },
        ctx.json,
    );
    Ok(())
}
