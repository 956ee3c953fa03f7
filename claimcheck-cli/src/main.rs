//! claimcheck: command-line frontend for the fact-check engine
//!
//! # Subcommands
//! - `check --brief <file> --case <file> [--json] [--remote]`: verify a brief
//! - `resolve <citation>`: show how a guideline citation resolves
//! - `validate <code>`: identify the coding system of a code
//! - `status`: show server health
//!
//! `check` exits with status 2 when the overall status is `fail`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use claimcheck_core::codes::{code_system, leading_token};
use claimcheck_core::resolver::{is_plan_specific, resolve_guideline, GuidelineResolution};
use claimcheck_core::{Brief, CaseRecord, ClaimStatus, FactCheckResult, FactChecker, OverallStatus};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8787";
const FAIL_EXIT_CODE: i32 = 2;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "claimcheck",
    version,
    about = "Deterministic fact-checking for clinical review briefs"
)]
struct Cli {
    /// ClaimCheck HTTP server URL (overrides CLAIMCHECK_HTTP_URL env var)
    #[arg(long, env = "CLAIMCHECK_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Verify a brief against its originating case
    Check {
        /// Path to the brief JSON file
        #[arg(long)]
        brief: PathBuf,

        /// Path to the case JSON file
        #[arg(long)]
        case: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Send the request to the server instead of checking locally
        #[arg(long)]
        remote: bool,
    },

    /// Resolve a guideline citation against the built-in catalog
    Resolve {
        citation: String,
    },

    /// Identify which coding system a code belongs to
    Validate {
        code: String,
    },

    /// Show ClaimCheck server status
    Status,
}

// ============================================================================
// Input
// ============================================================================

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

// ============================================================================
// Output
// ============================================================================

fn status_marker(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Verified => "✅",
        ClaimStatus::Unverified => "❔",
        ClaimStatus::Flagged => "❌",
    }
}

/// Human-readable report for a fact-check result.
pub fn render_report(result: &FactCheckResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Overall: {} ({}/100)\n",
        result.overall_status, result.overall_score
    ));
    out.push_str(&format!(
        "Claims:  {} verified, {} unverified, {} flagged\n",
        result.summary.verified, result.summary.unverified, result.summary.flagged
    ));

    for section in &result.sections {
        out.push_str(&format!("\n## {}\n", section.section));
        if section.claims.is_empty() && section.flags.is_empty() {
            out.push_str("  (no claims)\n");
        }
        for claim in &section.claims {
            out.push_str(&format!("  {} {}\n", status_marker(claim.status), claim.claim));
            out.push_str(&format!("     {}\n", claim.explanation));
        }
        for flag in &section.flags {
            out.push_str(&format!("  ⚠ {}\n", flag));
        }
    }

    let failed: Vec<_> = result.failed_checks().collect();
    if !failed.is_empty() {
        out.push_str("\n## Consistency\n");
        for check in failed {
            out.push_str(&format!("  ❌ {}: {}\n", check.check, check.detail));
        }
    }

    out
}

/// Exit code for a finished check.
pub fn exit_code_for(status: OverallStatus) -> i32 {
    match status {
        OverallStatus::Fail => FAIL_EXIT_CODE,
        OverallStatus::Pass | OverallStatus::Warning => 0,
    }
}

// ============================================================================
// Commands
// ============================================================================

fn check_remote(server: &str, brief: &Brief, case: &CaseRecord) -> anyhow::Result<FactCheckResult> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let url = format!("{}/fact-check", server);
    let body = serde_json::json!({ "brief": brief, "case": case });

    let resp = client
        .post(&url)
        .json(&body)
        .send()
        .with_context(|| format!("connection failed to {}", url))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        anyhow::bail!("server returned {}: {}", status, body);
    }

    resp.json().context("failed to parse fact-check response")
}

fn do_check(
    server: &str,
    brief_path: &Path,
    case_path: &Path,
    json_output: bool,
    remote: bool,
) -> anyhow::Result<i32> {
    let brief: Brief = read_json(brief_path)?;
    let case: CaseRecord = read_json(case_path)?;

    let result = if remote {
        check_remote(server, &brief, &case)?
    } else {
        FactChecker::builtin().check(&brief, &case)
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result));
    }

    Ok(exit_code_for(result.overall_status))
}

/// One-line description of how a citation resolves.
pub fn describe_resolution(checker: &FactChecker, citation: &str) -> String {
    let mut line = match resolve_guideline(checker.guidelines(), citation) {
        GuidelineResolution::Catalog(entry) => format!(
            "✅ {} ({}, {})",
            entry.canonical_name,
            entry.organization,
            entry.category.label()
        ),
        GuidelineResolution::RegulatoryFormat => {
            "❔ Regulatory citation format; requires manual confirmation".to_string()
        }
        GuidelineResolution::Unrecognized => "❌ Unrecognized guideline citation".to_string(),
    };
    if is_plan_specific(citation) {
        line.push_str(" [plan-specific]");
    }
    line
}

/// One-line description of a code's system.
pub fn describe_code(code: &str) -> String {
    let token = leading_token(code);
    match code_system(token) {
        Some(system) => format!("✅ {} is a valid {} code", token, system.label()),
        None => format!("❌ \"{}\" is not a valid CPT, HCPCS or ICD-10 code", token),
    }
}

/// Show the server status by calling GET /health.
fn do_status(server: &str) -> anyhow::Result<i32> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let url = format!("{}/health", server);
    let resp = client.get(&url).send();

    match resp {
        Ok(r) if r.status().is_success() => {
            let body: serde_json::Value = r.json().unwrap_or_default();
            println!("ClaimCheck server: {}", body["status"].as_str().unwrap_or("unknown"));
            println!("Version:           {}", body["version"].as_str().unwrap_or("?"));
            println!("Guidelines:        {}", body["guideline_entries"]);
            println!("Socket:            {}", body["socket"].as_str().unwrap_or("?"));
            Ok(0)
        }
        Ok(r) => {
            eprintln!("claimcheck: server unhealthy (HTTP {})", r.status());
            Ok(1)
        }
        Err(e) => {
            eprintln!("claimcheck: cannot reach {}: {}", url, e);
            Ok(1)
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Check {
            brief,
            case,
            json,
            remote,
        } => do_check(&server, &brief, &case, json, remote),
        Commands::Resolve { citation } => {
            println!("{}", describe_resolution(&FactChecker::builtin(), &citation));
            Ok(0)
        }
        Commands::Validate { code } => {
            let code_ok = code_system(leading_token(&code)).is_some();
            println!("{}", describe_code(&code));
            Ok(if code_ok { 0 } else { 1 })
        }
        Commands::Status => do_status(&server),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("claimcheck: {:#}", e);
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
