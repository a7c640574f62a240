//! Resource Provider Client capability, one trait per resource category.
//!
//! Implementations own pagination, retry, and timeouts; a listing call
//! returns the fully drained sequence or the first failure. The checks
//! never retry — a provider error is fatal to the scan.

pub mod export;

pub use export::ArmExport;

use crate::error::Result;
use crate::resource::{AccountProperties, NetworkSecurityGroup, StorageAccount, Vault};

pub trait NetworkProvider: Send + Sync {
    fn list_security_groups(&self) -> Result<Vec<NetworkSecurityGroup>>;
}

pub trait StorageProvider: Send + Sync {
    fn list_accounts(&self) -> Result<Vec<StorageAccount>>;

    /// Fetch the extended property bag for one account.
    fn account_properties(&self, resource_group: &str, name: &str) -> Result<AccountProperties>;
}

pub trait KeyVaultProvider: Send + Sync {
    fn list_vaults(&self) -> Result<Vec<Vault>>;
}

/// One constructed client per resource category, handed to the checks.
pub struct ProviderSet {
    pub network: Box<dyn NetworkProvider>,
    pub storage: Box<dyn StorageProvider>,
    pub key_vault: Box<dyn KeyVaultProvider>,
}
