use crate::rules::policy::PolicyVerdict;
use crate::rules::{Finding, Severity};

/// Render findings as console output, in aggregation order (NSG, then
/// Storage, then KeyVault, listing order within each).
pub fn render(findings: &[Finding], verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    if findings.is_empty() {
        output.push_str("\n  No findings detected. Your resources appear to be secure.\n\n");
        return output;
    }

    output.push_str(&format!("\n  {} finding(s) detected:\n\n", findings.len()));

    for finding in findings {
        let severity_tag = match finding.severity {
            Severity::Critical => "[CRITICAL]",
            Severity::High => "[HIGH]    ",
            Severity::Medium => "[MEDIUM]  ",
            Severity::Low => "[LOW]     ",
        };

        output.push_str(&format!(
            "  {} {} {}\n",
            severity_tag, finding.id, finding.description
        ));
        output.push_str(&format!(
            "           at {} ({})\n",
            finding.resource, finding.service
        ));
        output.push_str(&format!(
            "           cvss: {}  mitre: {}\n",
            finding.cvss_score, finding.mitre
        ));
        output.push('\n');
    }

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} (threshold: {}, highest: {})\n\n",
        status,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::policy::Policy;

    #[test]
    fn empty_findings_render_reassurance() {
        let verdict = Policy::default().evaluate(&[]);
        let out = render(&[], &verdict);
        assert!(out.contains("No findings detected"));
    }

    #[test]
    fn findings_render_in_given_order_with_verdict() {
        let findings = vec![
            Finding::new("AZ-NSG-NSG_WORLD_SSH", "NSG", "rg/nsg/r", "NSG_WORLD_SSH", "World access to 22"),
            Finding::new("AZ-KV-PURGE-PROTECTION-DISABLED", "KeyVault", "kv1", "KV_NO_PURGE_PROTECTION", "Purge protection disabled"),
        ];
        let verdict = Policy::default().evaluate(&findings);
        let out = render(&findings, &verdict);

        let ssh = out.find("AZ-NSG-NSG_WORLD_SSH").unwrap();
        let kv = out.find("AZ-KV-PURGE-PROTECTION-DISABLED").unwrap();
        assert!(ssh < kv);
        assert!(out.contains("Result: FAIL"));
        assert!(out.contains("cvss: 9.8  mitre: T1046"));
    }
}
