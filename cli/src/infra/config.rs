//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::SetupConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LUTE_PWA_CONFIG";

/// Environment variable overriding `container.runtime`.
pub const RUNTIME_ENV: &str = "LUTE_PWA_CONTAINER_RUNTIME";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    path_override: Option<PathBuf>,
    runtime_override: Option<String>,
}

impl YamlConfigStore {
    /// Store honouring [`CONFIG_ENV`] and [`RUNTIME_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            path_override: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            runtime_override: std::env::var(RUNTIME_ENV)
                .ok()
                .filter(|r| !r.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path_override = Some(path);
        self
    }

    #[must_use]
    pub fn with_runtime(mut self, runtime: &str) -> Self {
        self.runtime_override = Some(runtime.to_string());
        self
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<SetupConfig> {
        let path = self.path()?;
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            SetupConfig::default()
        };
        if let Some(runtime) = &self.runtime_override {
            config.container.runtime.clone_from(runtime);
        }
        config
            .validate()
            .with_context(|| format!("checking {}", path.display()))?;
        Ok(config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path_override {
            return Ok(path.clone());
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".luteformobile").join("config.yaml"))
    }
}
