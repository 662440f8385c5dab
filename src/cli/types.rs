//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::BuildNumber;
use crate::infrastructure::config::{ConfigOverrides, ServerOverrides};

#[derive(Parser, Debug)]
#[command(name = "jobwatch")]
#[command(about = "Trigger Jenkins builds, tail their logs, sync job configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Jenkins base URL
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// User for basic authentication
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// API token for basic authentication
    #[arg(long, global = true)]
    pub token: Option<String>,
}

impl Cli {
    /// Command-line values to merge over file and environment configuration
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            job: None,
            server: ServerOverrides {
                url: self.url.clone(),
                user: self.user.clone(),
                token: self.token.clone(),
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trigger a build and tail it until it finishes
    Build(BuildArgs),

    /// Attach to the active build and tail it until it finishes
    Watch(JobArgs),

    /// Show the current status of a job
    Status(JobArgs),

    /// Print the console log of a build
    Log(LogArgs),

    /// Download the job's config.xml
    Pull(SyncArgs),

    /// Upload a local file as the job's config.xml
    Push(SyncArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Job name; folders are separated by `/` (defaults to `job` from config)
    pub job: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: JobArgs,

    /// Return as soon as the build is requested
    #[arg(long)]
    pub no_watch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    #[command(flatten)]
    pub target: JobArgs,

    /// Build number (defaults to the most recent build)
    pub build: Option<BuildNumber>,
}

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    #[command(flatten)]
    pub target: JobArgs,

    /// Local path of the configuration document (defaults to `config_file` from config)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}
