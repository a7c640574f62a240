use serde::{Deserialize, Serialize};

/// A storage account as listed by the storage provider. The listing
/// descriptor identifies the account; compliance-relevant settings come
/// from the separate extended-properties fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccount {
    pub id: String,
    pub name: String,
    /// Account kind, e.g. "StorageV2".
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub properties: Option<AccountProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProperties {
    #[serde(default)]
    pub allow_blob_public_access: Option<bool>,
}
