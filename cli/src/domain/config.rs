//! Domain types for setup configuration.
//!
//! Pure types only: no I/O, no async, no filesystem access.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::SetupError;
use crate::domain::base_href::DEPLOYED_BASE_PATH;
use crate::domain::bundle::ENTRY_HTML;

/// Top-level configuration stored in `~/.luteformobile/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SetupConfig {
    /// Container runtime settings.
    pub container: ContainerConfig,
    /// Where users reach the Lute server; only used for the final hint.
    pub server: ServerConfig,
}

/// Container runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContainerConfig {
    /// Runtime executable, e.g. `docker` or `podman`.
    pub runtime: String,
    /// Value passed to `ps --filter name=...`.
    pub name_filter: String,
    /// Deadline for probes and in-container commands. Unset means none.
    pub command_timeout_secs: Option<u64>,
    /// Deadline for a single copy into the container. Unset means none.
    pub copy_timeout_secs: Option<u64>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            name_filter: "lute".to_string(),
            command_timeout_secs: None,
            copy_timeout_secs: None,
        }
    }
}

impl ContainerConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn copy_timeout(&self) -> Option<Duration> {
        self.copy_timeout_secs.map(Duration::from_secs)
    }
}

impl SetupConfig {
    /// Reject values that would make every run fail.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidConfig`] for an empty runtime or a zero
    /// timeout.
    pub fn validate(&self) -> Result<(), SetupError> {
        let container = &self.container;
        if container.runtime.trim().is_empty() {
            return Err(SetupError::InvalidConfig {
                key: "container.runtime",
                reason: "must not be empty",
            });
        }
        if container.command_timeout_secs == Some(0) {
            return Err(SetupError::InvalidConfig {
                key: "container.command_timeout_secs",
                reason: "must be at least 1 (omit it for no deadline)",
            });
        }
        if container.copy_timeout_secs == Some(0) {
            return Err(SetupError::InvalidConfig {
                key: "container.copy_timeout_secs",
                reason: "must be at least 1 (omit it for no deadline)",
            });
        }
        Ok(())
    }
}

/// Lute server address shown in the post-deploy hint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "YOUR_LUTE_IP".to_string(),
            port: 5001,
        }
    }
}

impl ServerConfig {
    /// URL the user sets as "Server URL" inside the app.
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }

    /// URL of the deployed app.
    #[must_use]
    pub fn app_url(&self) -> String {
        format!(
            "http://{}:{}{DEPLOYED_BASE_PATH}{ENTRY_HTML}",
            self.host, self.port
        )
    }
}
