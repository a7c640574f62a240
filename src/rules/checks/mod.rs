mod key_vault;
mod nsg;
mod storage;

use super::Check;

pub use key_vault::VaultPurgeProtectionCheck;
pub use nsg::NsgWorldOpenCheck;
pub use storage::StoragePublicAccessCheck;

/// All built-in checks, in scan order: NSG, Storage, KeyVault.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(NsgWorldOpenCheck),
        Box::new(StoragePublicAccessCheck),
        Box::new(VaultPurgeProtectionCheck),
    ]
}
