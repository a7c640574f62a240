pub mod checks;
pub mod finding;
pub mod kb;
pub mod policy;

use crate::error::Result;
use crate::provider::ProviderSet;

pub use finding::{Finding, Severity};

/// A check evaluates one category of cloud resources against its rule
/// conditions and produces findings.
pub trait Check: Send + Sync {
    /// Logical resource category this check covers.
    fn service(&self) -> &'static str;

    /// Run the check against the providers. Provider failures propagate;
    /// missing optional resource properties never do.
    fn run(&self, providers: &ProviderSet) -> Result<Vec<Finding>>;
}

/// The registry runs every check, in registration order, against one
/// provider set.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create a registry with all built-in checks, in the fixed scan
    /// order: NSG, Storage, KeyVault.
    pub fn new() -> Self {
        Self {
            checks: checks::all_checks(),
        }
    }

    /// Invoke each check exactly once and concatenate outputs, preserving
    /// per-check order. The first provider failure aborts the scan — no
    /// partial silent results.
    pub fn run_all(&self, providers: &ProviderSet) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for check in &self.checks {
            let batch = check.run(providers)?;
            tracing::debug!(service = check.service(), count = batch.len(), "check complete");
            findings.extend(batch);
        }
        Ok(findings)
    }

    pub fn services(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.service()).collect()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::provider::{KeyVaultProvider, NetworkProvider, StorageProvider};
    use crate::resource::{
        AccountProperties, NetworkSecurityGroup, NsgProperties, SecurityRule,
        SecurityRuleProperties, StorageAccount, Vault, VaultProperties,
    };

    struct StaticNetwork(Vec<NetworkSecurityGroup>);
    struct StaticStorage(Vec<StorageAccount>);
    struct StaticKeyVault(Vec<Vault>);
    struct FailingNetwork;

    impl NetworkProvider for StaticNetwork {
        fn list_security_groups(&self) -> crate::error::Result<Vec<NetworkSecurityGroup>> {
            Ok(self.0.clone())
        }
    }

    impl NetworkProvider for FailingNetwork {
        fn list_security_groups(&self) -> crate::error::Result<Vec<NetworkSecurityGroup>> {
            Err(ScanError::Provider {
                category: "NSG".into(),
                message: "listing failed".into(),
            })
        }
    }

    impl StorageProvider for StaticStorage {
        fn list_accounts(&self) -> crate::error::Result<Vec<StorageAccount>> {
            Ok(self.0.clone())
        }

        fn account_properties(
            &self,
            _resource_group: &str,
            name: &str,
        ) -> crate::error::Result<AccountProperties> {
            self.0
                .iter()
                .find(|a| a.name == name)
                .and_then(|a| a.properties.clone())
                .ok_or_else(|| ScanError::Provider {
                    category: "Storage".into(),
                    message: format!("no properties for {name}"),
                })
        }
    }

    impl KeyVaultProvider for StaticKeyVault {
        fn list_vaults(&self) -> crate::error::Result<Vec<Vault>> {
            Ok(self.0.clone())
        }
    }

    fn world_ssh_nsg(rg: &str, nsg: &str, rule: &str) -> NetworkSecurityGroup {
        NetworkSecurityGroup {
            id: format!(
                "/subscriptions/s/resourceGroups/{rg}/providers/Microsoft.Network/networkSecurityGroups/{nsg}"
            ),
            name: nsg.to_owned(),
            location: None,
            properties: Some(NsgProperties {
                security_rules: Some(vec![SecurityRule {
                    name: rule.to_owned(),
                    properties: Some(SecurityRuleProperties {
                        access: Some("Allow".into()),
                        direction: Some("Inbound".into()),
                        source_address_prefix: Some("0.0.0.0/0".into()),
                        destination_port_range: Some("22".into()),
                        ..Default::default()
                    }),
                }]),
                default_security_rules: None,
            }),
        }
    }

    fn public_account(name: &str) -> StorageAccount {
        StorageAccount {
            id: format!(
                "/subscriptions/s/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/{name}"
            ),
            name: name.to_owned(),
            kind: None,
            location: None,
            properties: Some(AccountProperties {
                allow_blob_public_access: Some(true),
            }),
        }
    }

    fn unprotected_vault(name: &str) -> Vault {
        Vault {
            id: format!(
                "/subscriptions/s/resourceGroups/rg1/providers/Microsoft.KeyVault/vaults/{name}"
            ),
            name: name.to_owned(),
            location: None,
            properties: Some(VaultProperties {
                enable_purge_protection: Some(false),
            }),
        }
    }

    #[test]
    fn registry_runs_checks_in_fixed_order() {
        let registry = CheckRegistry::new();
        assert_eq!(registry.services(), vec!["NSG", "Storage", "KeyVault"]);
    }

    #[test]
    fn aggregation_preserves_block_and_intra_block_order() {
        let providers = ProviderSet {
            network: Box::new(StaticNetwork(vec![
                world_ssh_nsg("rg1", "nsg-a", "AllowSSH"),
                world_ssh_nsg("rg1", "nsg-b", "AllowSSH"),
            ])),
            storage: Box::new(StaticStorage(vec![public_account("acct1")])),
            key_vault: Box::new(StaticKeyVault(vec![
                unprotected_vault("kv1"),
                unprotected_vault("kv2"),
                unprotected_vault("kv3"),
            ])),
        };

        let findings = CheckRegistry::new().run_all(&providers).unwrap();
        let services: Vec<&str> = findings.iter().map(|f| f.service.as_str()).collect();
        assert_eq!(
            services,
            vec!["NSG", "NSG", "Storage", "KeyVault", "KeyVault", "KeyVault"]
        );
        assert_eq!(findings[0].resource, "rg1/nsg-a/AllowSSH");
        assert_eq!(findings[1].resource, "rg1/nsg-b/AllowSSH");
        assert_eq!(findings[3].resource, "kv1");
        assert_eq!(findings[5].resource, "kv3");
    }

    #[test]
    fn provider_failure_aborts_the_scan() {
        let providers = ProviderSet {
            network: Box::new(FailingNetwork),
            storage: Box::new(StaticStorage(vec![])),
            key_vault: Box::new(StaticKeyVault(vec![])),
        };

        let err = CheckRegistry::new().run_all(&providers).unwrap_err();
        assert!(matches!(err, ScanError::Provider { .. }));
    }
}
