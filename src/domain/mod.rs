//! Domain Layer
//!
//! Pure deployment model without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - DeploymentItem, AppliedAction, RollbackManifest
//! - `value_objects/` - SafePath, BackupSuffix, BackupPolicy, ContentHash
//! - `ports/` - Interface definitions for infrastructure
//!
//! All I/O goes through the traits in `ports/`.

pub mod entities;
pub mod ports;
pub mod value_objects;
