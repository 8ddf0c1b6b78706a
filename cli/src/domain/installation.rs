//! Lute installation shapes and the well-known places each one lives.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::bundle::DEPLOY_SUBDIR;

/// Home-relative directories that may hold a pip/venv install, in priority order.
pub const VENV_HOME_CANDIDATES: &[&str] = &["my_lute", "lute", ".lute"];

/// Name of the virtual environment inside a venv install.
pub const VENV_DIR: &str = "myenv";

/// Home-relative directories that may hold a source checkout, in priority order.
pub const SOURCE_HOME_CANDIDATES: &[&str] = &["lute", "Lute"];

/// Static-asset roots probed inside a container, in priority order.
pub const CONTAINER_STATIC_CANDIDATES: &[&str] = &["/lute/static", "/lute-data/web"];

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static PYTHON_LIB_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^python(3\.\d+)$").expect("valid regex"));

/// Where the Lute server is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InstallationInfo {
    /// `pip install lute3` inside a virtual environment.
    Venv {
        static_path: PathBuf,
        install_root: PathBuf,
    },
    /// A running container; its static root is resolved at deploy time.
    Docker { container_name: String },
    /// A git checkout of the Lute sources.
    Source {
        static_path: PathBuf,
        install_root: PathBuf,
    },
}

impl InstallationInfo {
    #[must_use]
    pub fn kind(&self) -> InstallationKind {
        match self {
            Self::Venv { .. } => InstallationKind::Venv,
            Self::Docker { .. } => InstallationKind::Docker,
            Self::Source { .. } => InstallationKind::Source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallationKind {
    Venv,
    Docker,
    Source,
}

impl fmt::Display for InstallationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Venv => "venv",
            Self::Docker => "docker",
            Self::Source => "source",
        })
    }
}

/// Candidate venv install roots under `home`.
#[must_use]
pub fn venv_candidates(home: &Path) -> Vec<PathBuf> {
    VENV_HOME_CANDIDATES.iter().map(|c| home.join(c)).collect()
}

/// Candidate source checkouts: the home-relative ones, then the parent of
/// `base_dir` (the tool is commonly run from inside a checkout).
#[must_use]
pub fn source_candidates(home: &Path, base_dir: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = SOURCE_HOME_CANDIDATES.iter().map(|c| home.join(c)).collect();
    if let Some(parent) = base_dir.parent() {
        out.push(parent.to_path_buf());
    }
    out
}

/// Extract `3.<minor>` from a venv library directory name like `python3.11`.
#[must_use]
pub fn python_version_from_dir_name(name: &str) -> Option<&str> {
    PYTHON_LIB_DIR
        .captures(name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// `<venv>/lib/python<version>/site-packages/lute/static`
#[must_use]
pub fn venv_static_path(venv: &Path, python_version: &str) -> PathBuf {
    venv.join("lib")
        .join(format!("python{python_version}"))
        .join("site-packages")
        .join("lute")
        .join("static")
}

/// `<checkout>/lute/static`
#[must_use]
pub fn source_static_path(checkout: &Path) -> PathBuf {
    checkout.join("lute").join("static")
}

/// First non-empty line of a `ps --format {{.Names}}` listing.
#[must_use]
pub fn parse_container_name(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Deployment directory inside a container static root.
#[must_use]
pub fn container_deploy_path(static_root: &str) -> String {
    format!("{}/{DEPLOY_SUBDIR}", static_root.trim_end_matches('/'))
}
