//! Application service: deploy the bundle into a target.
//!
//! Every installation kind goes through the same procedure: clear the
//! destination, copy the allow-listed bundle members, then fix the base
//! href. Targets only supply the transport (local filesystem or container
//! runtime).

pub mod container;
pub mod local;

use anyhow::{Context, Result};
use serde::Serialize;

pub use container::ContainerTarget;
pub use local::LocalTarget;

use crate::application::ports::{DeployTarget, LocalFs, ProgressReporter};
use crate::domain::base_href::DEPLOYED_BASE_PATH;
use crate::domain::{BaseHrefOutcome, BundlePath, DeployPlan};

/// What a deployment did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub destination: String,
    pub copied: Vec<String>,
    pub skipped: Vec<String>,
    pub base_href: BaseHrefOutcome,
}

/// Apply the allow-list to the bundle directory listing.
///
/// # Errors
///
/// Returns an error if the bundle directory cannot be listed.
pub fn plan_deployment(fs: &impl LocalFs, bundle: &BundlePath) -> Result<DeployPlan> {
    let entries = fs
        .list_dir(bundle.as_path())
        .with_context(|| format!("listing bundle {}", bundle.as_path().display()))?;
    Ok(DeployPlan::from_entries(entries))
}

/// Run the deploy procedure against `target`.
///
/// Any failure aborts immediately; a partially written destination is left
/// as is and cleared by the next run.
///
/// # Errors
///
/// Returns an error if clearing, copying, or the base-href rewrite fails.
pub async fn deploy_bundle(
    target: &impl DeployTarget,
    bundle: &BundlePath,
    plan: &DeployPlan,
    reporter: &impl ProgressReporter,
) -> Result<DeployReport> {
    let destination = target.destination();
    reporter.step(&format!("clearing {destination}..."));
    target
        .reset()
        .await
        .with_context(|| format!("preparing {destination}"))?;

    for name in &plan.skipped {
        reporter.warn(&format!("skipping {name} (not part of the app)"));
    }

    reporter.step(&format!("copying {} app files...", plan.copy.len()));
    for entry in &plan.copy {
        tracing::debug!(name = %entry.name, dir = entry.is_dir, "copying bundle entry");
        target
            .copy_entry(bundle.as_path(), entry)
            .await
            .with_context(|| format!("copying {}", entry.name))?;
    }
    reporter.success(&format!("copied app files to {destination}"));

    let base_href = if plan.includes_entry_html() {
        reporter.step("fixing base href...");
        target.rewrite_base_href().await?
    } else {
        BaseHrefOutcome::EntryMissing
    };
    match base_href {
        BaseHrefOutcome::Rewritten => {
            reporter.success(&format!("base href set to {DEPLOYED_BASE_PATH}"));
        }
        BaseHrefOutcome::NoMarker => {
            reporter.warn("index.html has no recognised base href; left unchanged");
        }
        BaseHrefOutcome::EntryMissing => {
            reporter.warn("no index.html deployed; base href not set");
        }
    }

    Ok(DeployReport {
        destination,
        copied: plan.copy.iter().map(|e| e.name.clone()).collect(),
        skipped: plan.skipped.clone(),
        base_href,
    })
}
