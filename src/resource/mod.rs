//! Typed Azure resource descriptors.
//!
//! Wire shapes follow the ARM JSON representation: `camelCase` field names
//! and a nested `properties` bag, with every optional property modeled as
//! an explicit `Option` rather than probed at runtime.

pub mod key_vault;
pub mod network;
pub mod storage;

pub use key_vault::{Vault, VaultProperties};
pub use network::{NetworkSecurityGroup, NsgProperties, SecurityRule, SecurityRuleProperties};
pub use storage::{AccountProperties, StorageAccount};

use crate::error::{Result, ScanError};

/// Extract the resource-group name from a hierarchical ARM resource id:
/// the path segment immediately following a `resourceGroups` component
/// (compared case-insensitively — ARM ids are not case-normalized).
pub fn extract_resource_group(id: &str) -> Result<&str> {
    let mut segments = id.split('/');
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case("resourceGroups") {
            return match segments.next() {
                Some(rg) if !rg.is_empty() => Ok(rg),
                _ => Err(ScanError::MalformedResourceId(id.to_owned())),
            };
        }
    }
    Err(ScanError::MalformedResourceId(id.to_owned()))
}
