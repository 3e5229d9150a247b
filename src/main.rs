//! safedeploy CLI
//!
//! Usage: safedeploy <COMMAND>
//!
//! Commands:
//!   apply  Deploy files, backing up everything overwritten
//!   undo   Reverse a deployment from its rollback manifest
//!   show   Print a rollback manifest summary

mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use safedeploy::presentation::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match &cli.command {
        Commands::Apply(args) => commands::apply::cmd_apply(args, cli.config.as_deref(), cli.json),
        Commands::Undo {
            manifest,
            remove_manifest,
        } => commands::undo::cmd_undo(
            manifest.as_deref(),
            *remove_manifest,
            cli.config.as_deref(),
            cli.json,
        ),
        Commands::Show { manifest } => {
            commands::show::cmd_show(manifest.as_deref(), cli.config.as_deref(), cli.json)
        }
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(commands::EXIT_FATAL);
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the -v level
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
