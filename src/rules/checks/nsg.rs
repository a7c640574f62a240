use serde_json::{json, Value};

use crate::error::Result;
use crate::provider::ProviderSet;
use crate::resource::extract_resource_group;
use crate::rules::{Check, Finding};

const WORLD: &str = "0.0.0.0/0";

/// Flags security group rules that admit inbound traffic from the entire
/// internet. The source prefix comparison is an exact string match against
/// `0.0.0.0/0` — no CIDR-range evaluation.
pub struct NsgWorldOpenCheck;

impl Check for NsgWorldOpenCheck {
    fn service(&self) -> &'static str {
        "NSG"
    }

    fn run(&self, providers: &ProviderSet) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for nsg in providers.network.list_security_groups()? {
            let rg = match extract_resource_group(&nsg.id) {
                Ok(rg) => rg.to_owned(),
                Err(e) => {
                    tracing::warn!(nsg = %nsg.name, error = %e, "skipping NSG with malformed id");
                    continue;
                }
            };
            let Some(props) = &nsg.properties else {
                continue;
            };

            // Explicit rules first, then the platform defaults, one ordered list.
            let rules = props
                .security_rules
                .iter()
                .flatten()
                .chain(props.default_security_rules.iter().flatten());

            for rule in rules {
                let Some(rule_props) = &rule.properties else {
                    continue;
                };
                if rule_props.access.as_deref() != Some("Allow") {
                    continue;
                }
                if rule_props.direction.as_deref() != Some("Inbound") {
                    continue;
                }
                if rule_props.source_address_prefix.as_deref() != Some(WORLD) {
                    continue;
                }

                let port = rule_props.destination_port_range.as_deref().unwrap_or("");
                let code = match port {
                    "22" => "NSG_WORLD_SSH",
                    "3389" => "NSG_WORLD_RDP",
                    _ => "NSG_WORLD_HTTP",
                };

                findings.push(
                    Finding::new(
                        format!("AZ-NSG-{code}"),
                        self.service(),
                        format!("{rg}/{}/{}", nsg.name, rule.name),
                        code,
                        format!("World access to {port}"),
                    )
                    .with_metadata("port", port_value(port))
                    .with_metadata("source", json!(WORLD)),
                );
            }
        }

        Ok(findings)
    }
}

fn port_value(port: &str) -> Value {
    port.parse::<u64>().map_or_else(|_| json!(port), |p| json!(p))
}
