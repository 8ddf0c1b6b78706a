//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{BaseHrefOutcome, BundleEntry, SetupConfig};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so the container runtime can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its output. No deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned. A spawn failure
    /// because the program does not exist must surface an
    /// [`std::io::Error`] of kind `NotFound` somewhere in the error chain.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program, killing it once `timeout` elapses.
    ///
    /// # Errors
    ///
    /// As [`CommandRunner::run`]; exceeding `timeout` must surface an
    /// [`std::io::Error`] of kind `TimedOut` in the error chain.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Local filesystem operations used by the locator, detector, and local deployer.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    /// Top-level members of a directory, in no particular order.
    fn list_dir(&self, path: &Path) -> Result<Vec<BundleEntry>>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Copy one file, preserving permissions and modification time.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;
    /// Copy a directory tree, merging into `to` if it already exists.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts where configuration comes from.
pub trait ConfigStore {
    /// Load configuration, returning defaults when nothing is stored.
    fn load(&self) -> Result<SetupConfig>;
    /// Path configuration is read from.
    fn path(&self) -> Result<PathBuf>;
}

// ── Deploy Target Port ────────────────────────────────────────────────────────

/// A place the bundle can be materialised into.
///
/// The shared deploy procedure drives every target through the same
/// clear → copy → rewrite sequence; only the transport differs.
#[allow(async_fn_in_trait)]
pub trait DeployTarget {
    /// Human-readable destination, e.g. a path or `container:/path`.
    fn destination(&self) -> String;
    /// Remove any previous deployment and leave an empty destination.
    async fn reset(&self) -> Result<()>;
    /// Copy one allow-listed bundle member into the destination.
    async fn copy_entry(&self, bundle_dir: &Path, entry: &BundleEntry) -> Result<()>;
    /// Point the deployed entry HTML at the served location.
    async fn rewrite_base_href(&self) -> Result<BaseHrefOutcome>;
}
