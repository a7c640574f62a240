//! Static rule knowledge base.
//!
//! One row per rule: severity tier, CVSS 3.1 score, MITRE ATT&CK technique
//! id, and documentation links. Built once at first use and never mutated.
//! Every lookup is total: unknown rule ids resolve to the documented
//! fallbacks (`Low`, `0.0`, `"-"`, no references), never an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::Severity;

pub struct RuleInfo {
    pub severity: Severity,
    pub cvss: f64,
    pub mitre: &'static str,
    pub references: &'static [&'static str],
}

const NSG_DOCS: &str =
    "https://docs.microsoft.com/azure/virtual-network/network-security-groups-overview";
const STG_DOCS: &str =
    "https://docs.microsoft.com/azure/storage/blobs/anonymous-read-access-configure";
const KV_DOCS: &str = "https://docs.microsoft.com/azure/key-vault/general/soft-delete-overview";

// CVSS bands: Critical 9.0-10.0 | High 7.0-8.9 | Medium 4.0-6.9 | Low 0.1-3.9
static RULES: Lazy<HashMap<&'static str, RuleInfo>> = Lazy::new(|| {
    HashMap::from([
        (
            "NSG_WORLD_SSH",
            RuleInfo {
                severity: Severity::High,
                cvss: 9.8, // remote execution possible
                mitre: "T1046",
                references: &[NSG_DOCS],
            },
        ),
        (
            "NSG_WORLD_RDP",
            RuleInfo {
                severity: Severity::High,
                cvss: 9.8, // remote execution possible
                mitre: "T1046",
                references: &[NSG_DOCS],
            },
        ),
        (
            "NSG_WORLD_HTTP",
            RuleInfo {
                severity: Severity::Medium,
                cvss: 7.5, // exposure to attacks
                mitre: "T1190",
                references: &[NSG_DOCS],
            },
        ),
        (
            "STG_PUBLIC_BLOB",
            RuleInfo {
                severity: Severity::High,
                cvss: 9.1, // data exposure
                mitre: "T1530",
                references: &[STG_DOCS],
            },
        ),
        (
            "KV_NO_PURGE_PROTECTION",
            RuleInfo {
                severity: Severity::Medium,
                cvss: 6.5, // recovery/deletion risk
                mitre: "T1211",
                references: &[KV_DOCS],
            },
        ),
    ])
});

pub fn severity_for(rule: &str) -> Severity {
    RULES.get(rule).map_or(Severity::Low, |r| r.severity)
}

pub fn cvss_for(rule: &str) -> f64 {
    RULES.get(rule).map_or(0.0, |r| r.cvss)
}

pub fn mitre_for(rule: &str) -> &'static str {
    RULES.get(rule).map_or("-", |r| r.mitre)
}

pub fn references_for(rule: &str) -> Vec<String> {
    RULES.get(rule).map_or_else(Vec::new, |r| {
        r.references.iter().map(|s| (*s).to_owned()).collect()
    })
}

/// All registered rule ids, sorted for stable CLI output.
pub fn known_rules() -> Vec<&'static str> {
    let mut rules: Vec<&'static str> = RULES.keys().copied().collect();
    rules.sort_unstable();
    rules
}
