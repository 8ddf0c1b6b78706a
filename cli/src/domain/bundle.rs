//! Web app bundle layout and the allow-list that decides what gets deployed.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// HTML entry point of the bundle.
pub const ENTRY_HTML: &str = "index.html";

/// Compiled application script; its presence marks a real build.
pub const COMPILED_APP: &str = "main.dart.js";

/// Build metadata written by the toolchain. Never deployed, never reported.
pub const BUILD_ID_FILE: &str = ".last_build_id";

/// Subdirectory of the host's static assets that receives the bundle.
pub const DEPLOY_SUBDIR: &str = "luteformobile";

/// Top-level bundle members eligible for deployment.
pub const ALLOW_LIST: &[&str] = &[
    "assets",
    "canvaskit",
    "icons",
    "index.html",
    "main.dart.js",
    "favicon.png",
    "flutter.js",
    "flutter_bootstrap.js",
    "flutter_service_worker.js",
    "manifest.json",
    "version.json",
];

/// Directories that may hold a bundle, in lookup order: the base directory
/// itself, then its `build/web` output directory.
#[must_use]
pub fn bundle_candidates(base_dir: &Path) -> [PathBuf; 2] {
    [base_dir.to_path_buf(), base_dir.join("build").join("web")]
}

/// A directory confirmed to contain the entry HTML and the compiled app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BundlePath(PathBuf);

impl BundlePath {
    /// Wrap a directory the caller has already checked for [`ENTRY_HTML`]
    /// and [`COMPILED_APP`].
    #[must_use]
    pub fn confirmed(dir: PathBuf) -> Self {
        Self(dir)
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// One top-level member of the bundle directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleEntry {
    pub name: String,
    pub is_dir: bool,
}

impl BundleEntry {
    #[must_use]
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: false,
        }
    }

    #[must_use]
    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: true,
        }
    }
}

/// What the deployer does with a bundle member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// Allow-listed: copy into the destination.
    Copy,
    /// Not part of the app: skip and tell the user.
    Skip,
    /// Build metadata: skip silently.
    Ignore,
}

/// Classify a top-level bundle member by name.
#[must_use]
pub fn classify(name: &str) -> EntryAction {
    if name == BUILD_ID_FILE {
        EntryAction::Ignore
    } else if ALLOW_LIST.contains(&name) {
        EntryAction::Copy
    } else {
        EntryAction::Skip
    }
}

/// The allow-list applied to a concrete bundle listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeployPlan {
    /// Members to copy, sorted by name.
    pub copy: Vec<BundleEntry>,
    /// Names of members left behind, sorted.
    pub skipped: Vec<String>,
}

impl DeployPlan {
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = BundleEntry>) -> Self {
        let mut plan = Self::default();
        for entry in entries {
            match classify(&entry.name) {
                EntryAction::Copy => plan.copy.push(entry),
                EntryAction::Skip => plan.skipped.push(entry.name),
                EntryAction::Ignore => {}
            }
        }
        plan.copy.sort_by(|a, b| a.name.cmp(&b.name));
        plan.skipped.sort();
        plan
    }

    /// Whether the entry HTML is among the members to copy.
    #[must_use]
    pub fn includes_entry_html(&self) -> bool {
        self.copy.iter().any(|e| e.name == ENTRY_HTML)
    }
}
