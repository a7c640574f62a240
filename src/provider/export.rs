//! Offline provider backed by a directory of ARM JSON export files.
//!
//! The directory is whatever `az network nsg list -o json` (and friends)
//! or a raw ARM `GET .../providers/...?api-version=` produced: each file
//! is either a plain JSON array of resources or a `{"value": [...]}` page
//! document. Multiple files per category are merged in walk order, which
//! is how paged exports land on disk.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::provider::{KeyVaultProvider, NetworkProvider, ProviderSet, StorageProvider};
use crate::resource::{
    extract_resource_group, AccountProperties, NetworkSecurityGroup, StorageAccount, Vault,
};

const NSG_TYPE: &str = "microsoft.network/networksecuritygroups";
const STORAGE_TYPE: &str = "microsoft.storage/storageaccounts";
const VAULT_TYPE: &str = "microsoft.keyvault/vaults";

/// Parsed contents of an export directory.
#[derive(Default)]
pub struct ArmExport {
    security_groups: Vec<NetworkSecurityGroup>,
    accounts: Vec<StorageAccount>,
    vaults: Vec<Vault>,
}

impl ArmExport {
    /// Walk `root` and load every `.json` export file found. Files that
    /// are not valid JSON are skipped with a warning; resource documents
    /// of unrecognized ARM types are ignored. A directory containing no
    /// JSON export files at all is an error — an empty subscription still
    /// exports empty lists.
    pub fn load(root: &Path) -> Result<Self> {
        let mut export = Self::default();
        let mut files_loaded = 0usize;

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|e| ScanError::Provider {
                category: "export".into(),
                message: format!("cannot walk {}: {e}", root.display()),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json {
                continue;
            }

            let raw = std::fs::read_to_string(path)?;
            let doc: Value = match serde_json::from_str(&raw) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "skipping unparseable export file");
                    continue;
                }
            };
            files_loaded += 1;
            export.ingest(doc, path)?;
        }

        if files_loaded == 0 {
            return Err(ScanError::NoExport(root.display().to_string()));
        }

        tracing::debug!(
            nsgs = export.security_groups.len(),
            accounts = export.accounts.len(),
            vaults = export.vaults.len(),
            files = files_loaded,
            "loaded ARM export"
        );
        Ok(export)
    }

    /// Wrap the loaded export in one provider per category.
    pub fn into_providers(self) -> ProviderSet {
        let shared = Arc::new(self);
        ProviderSet {
            network: Box::new(ExportNetwork(Arc::clone(&shared))),
            storage: Box::new(ExportStorage(Arc::clone(&shared))),
            key_vault: Box::new(ExportKeyVault(shared)),
        }
    }

    fn ingest(&mut self, doc: Value, path: &Path) -> Result<()> {
        let resources = match doc {
            // az CLI list output
            Value::Array(items) => items,
            // ARM page document
            Value::Object(mut map) => match map.remove("value") {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(map)],
            },
            _ => return Ok(()),
        };

        for resource in resources {
            let Some(arm_type) = resource.get("type").and_then(Value::as_str) else {
                continue;
            };
            match arm_type.to_ascii_lowercase().as_str() {
                NSG_TYPE => self.security_groups.push(typed(resource, path)?),
                STORAGE_TYPE => self.accounts.push(typed(resource, path)?),
                VAULT_TYPE => self.vaults.push(typed(resource, path)?),
                other => {
                    tracing::debug!(file = %path.display(), arm_type = other, "ignoring resource type");
                }
            }
        }
        Ok(())
    }
}

fn typed<T: serde::de::DeserializeOwned>(resource: Value, path: &Path) -> Result<T> {
    serde_json::from_value(resource).map_err(|e| ScanError::Provider {
        category: "export".into(),
        message: format!("malformed resource document in {}: {e}", path.display()),
    })
}

struct ExportNetwork(Arc<ArmExport>);
struct ExportStorage(Arc<ArmExport>);
struct ExportKeyVault(Arc<ArmExport>);

impl NetworkProvider for ExportNetwork {
    fn list_security_groups(&self) -> Result<Vec<NetworkSecurityGroup>> {
        Ok(self.0.security_groups.clone())
    }
}

impl StorageProvider for ExportStorage {
    fn list_accounts(&self) -> Result<Vec<StorageAccount>> {
        Ok(self.0.accounts.clone())
    }

    fn account_properties(&self, resource_group: &str, name: &str) -> Result<AccountProperties> {
        self.0
            .accounts
            .iter()
            .find(|a| {
                a.name == name
                    && extract_resource_group(&a.id)
                        .map(|rg| rg.eq_ignore_ascii_case(resource_group))
                        .unwrap_or(false)
            })
            .and_then(|a| a.properties.clone())
            .ok_or_else(|| ScanError::Provider {
                category: "Storage".into(),
                message: format!("no exported properties for account {resource_group}/{name}"),
            })
    }
}

impl KeyVaultProvider for ExportKeyVault {
    fn list_vaults(&self) -> Result<Vec<Vault>> {
        Ok(self.0.vaults.clone())
    }
}
