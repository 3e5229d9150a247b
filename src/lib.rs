//! safedeploy - transactional file deployment
//!
//! Materializes a set of files under a deployment root, copies every file it
//! overwrites to a backup first, and records a rollback manifest that a later
//! `undo` replays to restore the tree.
//!
//! Layers:
//! - `domain` - entities, value objects and ports (no I/O)
//! - `application` - apply, rollback writer and undo use cases
//! - `infrastructure` - local file system, TOML manifests, event sinks, plan inputs
//! - `presentation` - CLI definition, use case factory, output rendering

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::{ApplyOptions, ApplyResult, ApplyUseCase, RollbackWriter, UndoUseCase};
pub use config::Config;
pub use domain::entities::{AppliedAction, DeploymentItem, RollbackManifest};
pub use error::{DeployError, SafedeployError, SafedeployResult, UndoError};
