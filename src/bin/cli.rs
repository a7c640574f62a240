use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use azscan::config::Config;
use azscan::output::OutputFormat;
use azscan::rules::{kb, Severity};
use azscan::ScanOptions;

#[derive(Parser)]
#[command(
    name = "azscan",
    about = "Azure security scanner for exported resource configurations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of ARM JSON export files
    Scan {
        /// Path to the export directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, html)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Minimum severity to fail (low, medium, high, critical)
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all rules in the knowledge base
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .azscan.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            path,
            config,
            format,
            fail_on,
            output,
        } => cmd_scan(path, config, format, fail_on, output),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    output_path: Option<PathBuf>,
) -> Result<i32, azscan::error::ScanError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let fail_on = fail_on_str.and_then(|s| {
        let sev = Severity::from_str_lenient(&s);
        if sev.is_none() {
            eprintln!("Warning: unknown severity '{}', using config default", s);
        }
        sev
    });

    let options = ScanOptions {
        config_path: config,
        format,
        fail_on_override: fail_on,
    };

    let report = azscan::scan_export(&path, &options)?;
    let rendered = azscan::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = findings at or above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_rules(format_str: String) -> Result<i32, azscan::error::ScanError> {
    let rules: Vec<serde_json::Value> = kb::known_rules()
        .into_iter()
        .map(|rule| {
            serde_json::json!({
                "rule": rule,
                "severity": kb::severity_for(rule),
                "cvss_score": kb::cvss_for(rule),
                "mitre": kb::mitre_for(rule),
            })
        })
        .collect();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<26} {:<10} {:<6} MITRE", "RULE", "SEVERITY", "CVSS");
            println!("{}", "-".repeat(56));
            for rule in kb::known_rules() {
                println!(
                    "{:<26} {:<10} {:<6} {}",
                    rule,
                    kb::severity_for(rule).to_string(),
                    kb::cvss_for(rule),
                    kb::mitre_for(rule),
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, azscan::error::ScanError> {
    let path = PathBuf::from(".azscan.toml");

    if path.exists() && !force {
        eprintln!(".azscan.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .azscan.toml");

    Ok(0)
}
