//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the top-level flags and the loaded
//! configuration, then handed to each command as `&AppContext`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::SetupConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::StdFs;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Directory the tool treats as its own location.
    pub base_dir: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Loaded configuration.
    pub config: SetupConfig,
    /// Container runtime process runner.
    pub runner: TokioCommandRunner,
    /// Local filesystem.
    pub fs: StdFs,
    /// User home directory.
    pub home: PathBuf,
    /// Where the bundle is looked for; its parent is a source-checkout candidate.
    pub base_dir: PathBuf,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the home or working directory cannot be determined,
    /// or the config file exists but cannot be parsed.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let config = YamlConfigStore::from_env().load()?;
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        let cwd = std::env::current_dir().context("cannot determine working directory")?;
        let base_dir = resolve_base_dir(&cwd, flags.base_dir);
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // JSON output must stay parseable, so narration is silenced.
        let quiet = flags.quiet || flags.json;

        Ok(Self {
            output: OutputContext::new(flags.no_color, quiet),
            mode,
            runner: TokioCommandRunner,
            config,
            fs: StdFs,
            home,
            base_dir,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Human renderer over this context's output settings.
    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }
}

/// Absolute form of the base directory, so its parent is a real directory
/// even when it was given as `.` or another relative path.
fn resolve_base_dir(cwd: &Path, dir: Option<PathBuf>) -> PathBuf {
    let dir = match dir {
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    };
    std::fs::canonicalize(&dir).unwrap_or(dir)
}
