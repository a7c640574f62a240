use serde::{Deserialize, Serialize};

/// A key vault as listed by the key vault provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub properties: Option<VaultProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultProperties {
    /// Absent means the vault was created without purge protection.
    #[serde(default)]
    pub enable_purge_protection: Option<bool>,
}
