//! CLI Argument Parsing
//!
//! Global flags (--json, --verbose, --config) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::value_objects::BackupPolicy;

/// safedeploy - transactional file deployment with replayable rollback
#[derive(Parser, Debug)]
#[command(name = "safedeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output (NDJSON events, JSON summaries)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./safedeploy.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy files under a root, backing up everything overwritten
    Apply(ApplyArgs),

    /// Reverse a deployment using its rollback manifest
    Undo {
        /// Rollback manifest to replay
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Delete the manifest once every entry was undone
        #[arg(long)]
        remove_manifest: bool,
    },

    /// Print a rollback manifest summary
    Show {
        /// Rollback manifest to read
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Deployment root directory
    #[arg(short, long, value_name = "DIR")]
    pub root: PathBuf,

    /// TOML plan listing the files to deploy
    #[arg(long, value_name = "FILE", conflicts_with = "from_dir", required_unless_present = "from_dir")]
    pub plan: Option<PathBuf>,

    /// Deploy every file found under a staging directory
    #[arg(long, value_name = "DIR")]
    pub from_dir: Option<PathBuf>,

    /// Where to write the rollback manifest
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Suffix for backup files (e.g. .bak)
    #[arg(long, value_name = "SUFFIX")]
    pub backup_suffix: Option<String>,

    /// What to do when a backup already exists
    #[arg(long, value_name = "POLICY", value_parser = parse_policy)]
    pub backup_policy: Option<BackupPolicy>,

    /// Skip comparing each backup against its original
    #[arg(long)]
    pub no_verify: bool,

    /// Replace an existing rollback manifest
    #[arg(short, long)]
    pub force: bool,

    /// Show what would be done without touching anything
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_policy(value: &str) -> Result<BackupPolicy, String> {
    BackupPolicy::parse(value).ok_or_else(|| {
        format!(
            "invalid backup policy '{}' (expected one of: {})",
            value,
            BackupPolicy::VALUES.join(", ")
        )
    })
}
