//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of a setup run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Could not find the web app bundle (looked in: {})", display_paths(.searched))]
    BundleNotFound { searched: Vec<PathBuf> },

    #[error("Could not find a Lute installation.")]
    InstallationNotFound,

    #[error("Could not find a static directory in container '{container}' (tried: {})", .candidates.join(", "))]
    StaticDirNotFound {
        container: String,
        candidates: Vec<String>,
    },

    #[error("Invalid configuration: {key} {reason}")]
    InvalidConfig {
        key: &'static str,
        reason: &'static str,
    },

    #[error("`{command}` failed with exit code {code}: {stderr}")]
    ContainerCommand {
        command: String,
        code: i32,
        stderr: String,
    },
}

impl SetupError {
    /// Stable identifier used in JSON error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BundleNotFound { .. } => "bundle_not_found",
            Self::InstallationNotFound => "installation_not_found",
            Self::StaticDirNotFound { .. } => "static_dir_not_found",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::ContainerCommand { .. } => "container_command_failed",
        }
    }

    /// Remediation shown under the error message, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::BundleNotFound { .. } => Some(
                "Run this from the PWA directory or the lute-pwa folder,\n\
                 or pass --bundle <DIR> pointing at a built web app.",
            ),
            Self::InstallationNotFound => Some(
                "Please install Lute first:\n    pip install lute3\n\n\
                 Or if using source, run from inside the lute directory.",
            ),
            Self::StaticDirNotFound { .. }
            | Self::InvalidConfig { .. }
            | Self::ContainerCommand { .. } => None,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
