//! Apply Module
//!
//! The Deployer: materializes deployment items under a root directory,
//! copying every file it overwrites to a backup first.
//!
//! ## Structure
//!
//! - `options` - Backup suffix, backup policy, verification
//! - `result` - `ApplyResult` (actions, created dirs, per-item errors) and `ApplyPreview`
//! - `use_case` - `ApplyUseCase`
//!
//! ## Usage
//!
//! ```ignore
//! use safedeploy::application::apply::{ApplyOptions, ApplyUseCase};
//!
//! let use_case = ApplyUseCase::new(LocalFs::new(), ApplyOptions::new());
//! let result = use_case.execute(&items, &root);
//! let manifest = result.manifest();
//! ```

mod options;
mod result;
mod use_case;

pub use options::ApplyOptions;
pub use result::{ApplyPreview, ApplyResult, ItemFailure, PlannedItem};
pub use use_case::ApplyUseCase;
