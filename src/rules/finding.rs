use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kb;

/// A security finding tied to one resource and one rule.
///
/// The enrichment fields (`severity`, `mitre`, `cvss_score`, `references`)
/// are always derived from `rule` through the knowledge base — construct
/// findings with [`Finding::new`] so the table stays the single source of
/// truth for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Finding identifier, `<PROVIDER>-<SERVICE>-<RULE-SUFFIX>`.
    pub id: String,
    /// Logical resource category ("NSG", "Storage", "KeyVault").
    pub service: String,
    /// Human-readable resource path.
    pub resource: String,
    /// Stable rule identifier, the knowledge-base key.
    pub rule: String,
    /// Human-readable explanation, may embed dynamic detail.
    pub description: String,
    pub severity: Severity,
    /// MITRE ATT&CK technique id, `"-"` when unmapped.
    pub mitre: String,
    /// CVSS 3.1 score in [0.0, 10.0].
    pub cvss_score: f64,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Finding {
    /// Build a finding for `rule`, pulling severity, CVSS score, MITRE
    /// technique, and references from the knowledge base.
    pub fn new(
        id: impl Into<String>,
        service: impl Into<String>,
        resource: impl Into<String>,
        rule: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let rule = rule.into();
        Self {
            id: id.into(),
            service: service.into(),
            resource: resource.into(),
            description: description.into(),
            severity: kb::severity_for(&rule),
            mitre: kb::mitre_for(&rule).to_owned(),
            cvss_score: kb::cvss_for(&rule),
            references: kb::references_for(&rule),
            metadata: BTreeMap::new(),
            rule,
        }
    }

    /// Attach one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Coarse risk tier derived from a rule. Serialized with capitalized
/// variant names (`"High"`), the scanner's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "critical")]
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_enrichment_from_rule() {
        let f = Finding::new(
            "AZ-NSG-NSG_WORLD_SSH",
            "NSG",
            "test-rg/test-nsg/AllowSSH",
            "NSG_WORLD_SSH",
            "World access to 22",
        );
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.mitre, "T1046");
        assert_eq!(f.cvss_score, 9.8);
        assert!(!f.references.is_empty());
        assert!(f.metadata.is_empty());
    }

    #[test]
    fn unknown_rule_gets_fallback_enrichment() {
        let f = Finding::new("X-Y-Z", "NSG", "r", "NOT_A_RULE", "d");
        assert_eq!(f.severity, Severity::Low);
        assert_eq!(f.mitre, "-");
        assert_eq!(f.cvss_score, 0.0);
        assert!(f.references.is_empty());
    }

    #[test]
    fn severity_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"High\"");
    }

    #[test]
    fn severity_accepts_lowercase_on_deserialize() {
        let s: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(s, Severity::Critical);
    }

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }
}
