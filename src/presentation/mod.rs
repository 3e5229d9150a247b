//! Presentation Layer
//!
//! - `cli` - argument parsing (clap)
//! - `factory` - use cases with their infrastructure wired in
//! - `output` - run summaries and manifest rendering (text/JSON)

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{ApplyArgs, Cli, Commands};
