use crate::rules::{Finding, Severity};
use crate::ScanReport;

/// Render a scan report as a self-contained HTML document. Findings keep
/// aggregation order; each card shows the finding id, description,
/// severity badge, CVSS badge, MITRE technique, and resource metadata.
pub fn render(report: &ScanReport) -> String {
    let findings = &report.findings;
    let verdict = &report.verdict;

    let severity_counts = SeverityCounts::from_findings(findings);
    let status_class = if verdict.pass { "pass" } else { "fail" };
    let status_text = if verdict.pass { "PASS" } else { "FAIL" };

    let cards: String = findings.iter().map(finding_card).collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Azure Security Scan Report</title>
<style>
  :root {{
    --bg: #0d1117; --fg: #c9d1d9; --border: #30363d;
    --card: #161b22; --badge-crit: #f85149; --badge-high: #f0883e;
    --badge-med: #d29922; --badge-low: #58a6ff; --muted: #8b949e;
    --pass: #3fb950; --fail: #f85149; --mitre: #1f3a5f;
  }}
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
    background: var(--bg); color: var(--fg); line-height: 1.5; padding: 2rem; }}
  .container {{ max-width: 900px; margin: 0 auto; }}
  header {{ display: flex; align-items: center; justify-content: space-between;
    padding: 1.5rem; background: var(--card); border: 1px solid var(--border);
    border-radius: 8px; margin-bottom: 1.5rem; }}
  header h1 {{ font-size: 1.4rem; }}
  .verdict {{ font-size: 1.2rem; font-weight: 700; padding: 0.4rem 1.2rem;
    border-radius: 6px; }}
  .verdict.pass {{ background: var(--pass); color: #000; }}
  .verdict.fail {{ background: var(--fail); color: #fff; }}
  .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
    gap: 1rem; margin-bottom: 1.5rem; }}
  .stat {{ background: var(--card); border: 1px solid var(--border);
    border-radius: 8px; padding: 1rem; text-align: center; }}
  .stat .count {{ font-size: 2rem; font-weight: 700; }}
  .stat .label {{ font-size: 0.85rem; color: var(--muted); }}
  .stat.critical .count {{ color: var(--badge-crit); }}
  .stat.high .count {{ color: var(--badge-high); }}
  .stat.medium .count {{ color: var(--badge-med); }}
  .stat.low .count {{ color: var(--badge-low); }}
  .finding {{ background: var(--card); border: 1px solid var(--border);
    border-radius: 8px; padding: 1.25rem; margin-bottom: 1rem; }}
  .finding.critical {{ border-left: 5px solid var(--badge-crit); }}
  .finding.high {{ border-left: 5px solid var(--badge-high); }}
  .finding.medium {{ border-left: 5px solid var(--badge-med); }}
  .finding.low {{ border-left: 5px solid var(--badge-low); }}
  .finding h3 {{ font-size: 1.05rem; margin-bottom: 0.5rem; }}
  .finding p.desc {{ margin-bottom: 0.75rem; }}
  .badge {{ display: inline-block; padding: 0.2rem 0.6rem; border-radius: 4px;
    font-size: 0.8rem; font-weight: 700; color: #fff; margin-right: 0.5rem; }}
  .badge.severity.critical {{ background: var(--badge-crit); }}
  .badge.severity.high {{ background: var(--badge-high); }}
  .badge.severity.medium {{ background: var(--badge-med); color: #000; }}
  .badge.severity.low {{ background: var(--badge-low); color: #000; }}
  .badge.cvss.critical {{ background: var(--badge-crit); }}
  .badge.cvss.high {{ background: var(--badge-high); }}
  .badge.cvss.medium {{ background: var(--badge-med); color: #000; }}
  .badge.cvss.low {{ background: var(--badge-low); color: #000; }}
  .meta {{ color: var(--muted); font-size: 0.9em; margin-top: 0.75rem; }}
  .meta code {{ color: var(--fg); }}
  .mitre {{ background: var(--mitre); padding: 0.5rem 0.75rem; border-radius: 4px;
    margin-top: 0.75rem; font-size: 0.9em; display: inline-block; }}
  .refs {{ margin-top: 0.75rem; font-size: 0.85em; }}
  .refs a {{ color: var(--badge-low); }}
  footer {{ margin-top: 1.5rem; text-align: center; font-size: 0.8rem;
    color: var(--muted); }}
  .empty {{ text-align: center; padding: 3rem; color: var(--pass); font-size: 1.2rem;
    background: var(--card); border: 1px solid var(--border); border-radius: 8px; }}
</style>
</head>
<body>
<div class="container">
  <header>
    <h1>Azure Security Scan Report</h1>
    <div class="verdict {status_class}">{status_text}</div>
  </header>

  <div class="summary">
    <div class="stat"><div class="count">{total}</div><div class="label">Total</div></div>
    <div class="stat critical"><div class="count">{critical}</div><div class="label">Critical</div></div>
    <div class="stat high"><div class="count">{high}</div><div class="label">High</div></div>
    <div class="stat medium"><div class="count">{medium}</div><div class="label">Medium</div></div>
    <div class="stat low"><div class="count">{low}</div><div class="label">Low</div></div>
  </div>

  {content}

  <footer>
    azscan {version} — run {run_id} — {generated_at} — threshold: {threshold}
  </footer>
</div>
</body>
</html>"##,
        status_class = status_class,
        status_text = status_text,
        total = findings.len(),
        critical = severity_counts.critical,
        high = severity_counts.high,
        medium = severity_counts.medium,
        low = severity_counts.low,
        version = env!("CARGO_PKG_VERSION"),
        run_id = report.run_id,
        generated_at = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        threshold = verdict.fail_threshold,
        content = if findings.is_empty() {
            "<div class=\"empty\">No findings detected. Your resources appear to be secure.</div>"
                .to_string()
        } else {
            cards
        },
    )
}

fn finding_card(f: &Finding) -> String {
    let sev_class = severity_class(f.severity);
    let refs: String = f
        .references
        .iter()
        .map(|url| {
            let escaped = html_escape(url);
            format!("<a href=\"{escaped}\">{escaped}</a>")
        })
        .collect::<Vec<_>>()
        .join(" · ");
    let refs_block = if refs.is_empty() {
        String::new()
    } else {
        format!("\n  <div class=\"refs\">{refs}</div>")
    };

    format!(
        r#"<div class="finding {sev_class}">
  <h3>{id}</h3>
  <p class="desc"><strong>{description}</strong></p>
  <span class="badge severity {sev_class}">Severity: {severity}</span>
  <span class="badge cvss {cvss_class}">CVSS 3.1: {cvss}</span>
  <div class="meta">
    <p><strong>Service:</strong> {service}</p>
    <p><strong>Resource:</strong> <code>{resource}</code></p>
    <p><strong>Rule:</strong> <code>{rule}</code></p>
  </div>
  <div class="mitre"><strong>MITRE ATT&amp;CK:</strong> {mitre}</div>{refs_block}
</div>
"#,
        sev_class = sev_class,
        id = html_escape(&f.id),
        description = html_escape(&f.description),
        severity = f.severity,
        cvss_class = cvss_tier(f.cvss_score),
        cvss = f.cvss_score,
        service = html_escape(&f.service),
        resource = html_escape(&f.resource),
        rule = html_escape(&f.rule),
        mitre = html_escape(&f.mitre),
        refs_block = refs_block,
    )
}

struct SeverityCounts {
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

impl SeverityCounts {
    fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = Self {
            critical: 0,
            high: 0,
            medium: 0,
            low: 0,
        };
        for f in findings {
            match f.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }
}

fn severity_class(s: Severity) -> &'static str {
    match s {
        Severity::Critical => "critical",
        Severity::High => "high",
        Severity::Medium => "medium",
        Severity::Low => "low",
    }
}

/// Visual tier for a CVSS badge, following the 3.1 qualitative bands.
fn cvss_tier(score: f64) -> &'static str {
    if score >= 9.0 {
        "critical"
    } else if score >= 7.0 {
        "high"
    } else if score >= 4.0 {
        "medium"
    } else {
        "low"
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::policy::Policy;
    use crate::rules::Finding;
    use crate::ScanReport;

    fn report(findings: Vec<Finding>) -> ScanReport {
        let verdict = Policy::default().evaluate(&findings);
        ScanReport {
            run_id: uuid::Uuid::nil(),
            generated_at: chrono::DateTime::UNIX_EPOCH,
            findings,
            verdict,
        }
    }

    #[test]
    fn cvss_tiers_follow_qualitative_bands() {
        assert_eq!(cvss_tier(9.8), "critical");
        assert_eq!(cvss_tier(9.0), "critical");
        assert_eq!(cvss_tier(7.5), "high");
        assert_eq!(cvss_tier(6.5), "medium");
        assert_eq!(cvss_tier(4.0), "medium");
        assert_eq!(cvss_tier(3.9), "low");
        assert_eq!(cvss_tier(0.0), "low");
    }

    #[test]
    fn empty_report_renders_explicit_message() {
        let html = render(&report(vec![]));
        assert!(html.contains("No findings detected"));
        assert!(!html.contains("class=\"finding "));
    }

    #[test]
    fn finding_card_carries_badges_and_mitre() {
        let html = render(&report(vec![Finding::new(
            "AZ-NSG-NSG_WORLD_SSH",
            "NSG",
            "test-rg/test-nsg/AllowSSH",
            "NSG_WORLD_SSH",
            "World access to 22",
        )]));

        assert!(html.contains("<h3>AZ-NSG-NSG_WORLD_SSH</h3>"));
        assert!(html.contains("badge severity high"));
        // 9.8 sits in the critical CVSS band even though the rule severity is High.
        assert!(html.contains("badge cvss critical"));
        assert!(html.contains("CVSS 3.1: 9.8"));
        assert!(html.contains("T1046"));
        assert!(html.contains("test-rg/test-nsg/AllowSSH"));
    }

    #[test]
    fn values_are_html_escaped() {
        let html = render(&report(vec![Finding::new(
            "X",
            "NSG",
            "<script>alert(1)</script>",
            "NSG_WORLD_SSH",
            "desc & more",
        )]));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("desc &amp; more"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn findings_keep_aggregation_order() {
        let html = render(&report(vec![
            Finding::new("AZ-NSG-NSG_WORLD_SSH", "NSG", "a", "NSG_WORLD_SSH", "d"),
            Finding::new("AZ-KV-PURGE-PROTECTION-DISABLED", "KeyVault", "b", "KV_NO_PURGE_PROTECTION", "d"),
        ]));
        let nsg = html.find("AZ-NSG-NSG_WORLD_SSH").unwrap();
        let kv = html.find("AZ-KV-PURGE-PROTECTION-DISABLED").unwrap();
        assert!(nsg < kv);
    }
}
