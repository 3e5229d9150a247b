//! Application Layer
//!
//! Use cases that orchestrate the business flow. Depends on domain ports
//! only; concrete infrastructure is injected by the presentation factory.
//!
//! ## Use Cases
//!
//! - `ApplyUseCase` - deploys items, backing up everything it overwrites
//! - `RollbackWriter` - turns applied actions into a persisted manifest
//! - `UndoUseCase` - replays a manifest to restore the tree

pub mod apply;
mod rollback_writer;
pub mod undo;

pub use apply::{ApplyOptions, ApplyPreview, ApplyResult, ApplyUseCase};
pub use rollback_writer::RollbackWriter;
pub use undo::{UndoResult, UndoUseCase};
