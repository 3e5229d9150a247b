//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod backup_policy;
mod backup_suffix;
mod hash;
mod path;

pub use backup_policy::BackupPolicy;
pub use backup_suffix::{BackupSuffix, SuffixError};
pub use hash::ContentHash;
pub use path::{PathError, SafePath};
