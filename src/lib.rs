//! azscan — Azure security scanner.
//!
//! Evaluates a subscription's exported resource descriptors (network
//! security groups, storage accounts, key vaults) against a fixed rule
//! set and emits findings enriched with severity, CVSS 3.1 score, MITRE
//! ATT&CK technique id, and reference links.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use azscan::{scan_export, ScanOptions};
//!
//! let options = ScanOptions::default();
//! let report = scan_export(Path::new("./exports"), &options).unwrap();
//! println!("Pass: {}, Findings: {}", report.verdict.pass, report.findings.len());
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod provider;
pub mod resource;
pub mod rules;

use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use config::Config;
use error::Result;
use output::OutputFormat;
use provider::{ArmExport, ProviderSet};
use rules::policy::PolicyVerdict;
use rules::{CheckRegistry, Finding};

pub use rules::Severity;

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.azscan.toml` in the export dir).
    pub config_path: Option<std::path::PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for fail_on threshold.
    pub fail_on_override: Option<Severity>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            fail_on_override: None,
        }
    }
}

/// Complete scan report.
#[derive(Debug)]
pub struct ScanReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
    pub verdict: PolicyVerdict,
}

/// Run all checks against an already-constructed provider set: NSG, then
/// Storage, then KeyVault, outputs concatenated in that order. The first
/// provider failure aborts the whole scan.
pub fn scan(providers: &ProviderSet, config: &Config) -> Result<ScanReport> {
    let registry = CheckRegistry::new();
    let findings = registry.run_all(providers)?;

    let effective = config.policy.apply(&findings);
    let verdict = config.policy.evaluate(&findings);
    tracing::info!(
        total = findings.len(),
        effective = effective.len(),
        pass = verdict.pass,
        "scan complete"
    );

    Ok(ScanReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        findings: effective,
        verdict,
    })
}

/// Run a complete scan over a directory of ARM JSON export files: load
/// config, build the offline providers, evaluate every check.
pub fn scan_export(path: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| path.join(".azscan.toml"));
    let mut config = Config::load(&config_path)?;

    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }

    let providers = ArmExport::load(path)?.into_providers();
    scan(&providers, &config)
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
