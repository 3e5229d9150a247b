//! Domain Entities
//!
//! - `DeploymentItem` - A file to be materialized under the deployment root
//! - `AppliedAction` - What the deployer did for one item
//! - `RollbackManifest` - The durable record consumed by undo

mod applied_action;
mod deployment_item;
mod rollback_manifest;

pub use applied_action::AppliedAction;
pub use deployment_item::DeploymentItem;
pub use rollback_manifest::{RollbackManifest, MANIFEST_VERSION};
