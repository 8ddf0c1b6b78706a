//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, a pretty printer for command results, and the dry-run
//! plan view.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::DeployPlan;

/// A dry-run plan together with where it would land.
#[derive(Serialize)]
struct PlannedDeploy<'a> {
    dry_run: bool,
    destination: &'a str,
    #[serde(flatten)]
    plan: &'a DeployPlan,
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Render a dry-run plan as a JSON object:
/// `{"dry_run": true, "destination": ..., "copy": [...], "skipped": [...]}`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_plan(plan: &DeployPlan, destination: &str) -> Result<String> {
    let view = PlannedDeploy {
        dry_run: true,
        destination,
        plan,
    };
    serde_json::to_string_pretty(&view).context("JSON serialization failed")
}
