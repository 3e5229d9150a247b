//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - local file system with atomic writes
//! - `repositories/` - TOML rollback manifest persistence
//! - `events/` - console and NDJSON event sinks
//! - `plan/` - deployment inputs (TOML plan file, staging directory)

pub mod events;
pub mod fs;
pub mod plan;
pub mod repositories;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::{expand_home, LocalFs};
pub use plan::{PlanError, PlanSource};
pub use repositories::TomlManifestRepository;
