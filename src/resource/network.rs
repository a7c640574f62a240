use serde::{Deserialize, Serialize};

/// A network security group as listed by the network provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub properties: Option<NsgProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsgProperties {
    #[serde(default)]
    pub security_rules: Option<Vec<SecurityRule>>,
    #[serde(default)]
    pub default_security_rules: Option<Vec<SecurityRule>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRule {
    pub name: String,
    #[serde(default)]
    pub properties: Option<SecurityRuleProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRuleProperties {
    /// "Allow" or "Deny".
    #[serde(default)]
    pub access: Option<String>,
    /// "Inbound" or "Outbound".
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub source_address_prefix: Option<String>,
    /// Single port, range ("1000-2000"), or "*".
    #[serde(default)]
    pub destination_port_range: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}
