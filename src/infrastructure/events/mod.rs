//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: One human-readable line per action

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
