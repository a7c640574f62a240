use serde_json::json;

use crate::error::Result;
use crate::provider::ProviderSet;
use crate::rules::{Check, Finding};

/// Flags key vaults without purge protection. An absent flag is treated
/// the same as `false` — vaults created before the feature existed never
/// carry it.
pub struct VaultPurgeProtectionCheck;

impl Check for VaultPurgeProtectionCheck {
    fn service(&self) -> &'static str {
        "KeyVault"
    }

    fn run(&self, providers: &ProviderSet) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for vault in providers.key_vault.list_vaults()? {
            let protected = vault
                .properties
                .as_ref()
                .and_then(|p| p.enable_purge_protection)
                .unwrap_or(false);
            if protected {
                continue;
            }

            let mut finding = Finding::new(
                "AZ-KV-PURGE-PROTECTION-DISABLED",
                self.service(),
                vault.name.clone(),
                "KV_NO_PURGE_PROTECTION",
                "Purge protection disabled",
            );
            if let Some(location) = &vault.location {
                finding = finding.with_metadata("location", json!(location));
            }
            findings.push(finding);
        }

        Ok(findings)
    }
}
