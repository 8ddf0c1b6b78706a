//! Deploy target for a running container, driven through the runtime CLI.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::application::ports::{CommandRunner, DeployTarget, ProgressReporter};
use crate::application::services::run_bounded;
use crate::domain::base_href::CONTAINER_SED_EXPR;
use crate::domain::bundle::ENTRY_HTML;
use crate::domain::config::ContainerConfig;
use crate::domain::installation::{CONTAINER_STATIC_CANDIDATES, container_deploy_path};
use crate::domain::{BaseHrefOutcome, BundleEntry, SetupError};

/// Deploys into `<static_root>/luteformobile` inside a container.
pub struct ContainerTarget<'a, R: CommandRunner> {
    runner: &'a R,
    runtime: String,
    container: String,
    dest: String,
    command_timeout: Option<Duration>,
    copy_timeout: Option<Duration>,
}

impl<'a, R: CommandRunner> ContainerTarget<'a, R> {
    /// Find the container's static-assets root and build a target for it.
    ///
    /// Candidates are probed with `test -d` in priority order. A probe that
    /// fails for any reason moves on to the next candidate.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::StaticDirNotFound`] when no candidate exists.
    pub async fn resolve(
        runner: &'a R,
        settings: &ContainerConfig,
        container: &str,
        reporter: &impl ProgressReporter,
    ) -> Result<Self> {
        let command_timeout = settings.command_timeout();
        for &candidate in CONTAINER_STATIC_CANDIDATES {
            let args = ["exec", container, "test", "-d", candidate];
            match run_bounded(runner, &settings.runtime, &args, command_timeout).await {
                Ok(out) if out.status.success() => {
                    reporter.success(&format!("static directory: {candidate}"));
                    return Ok(Self {
                        runner,
                        runtime: settings.runtime.clone(),
                        container: container.to_string(),
                        dest: container_deploy_path(candidate),
                        command_timeout,
                        copy_timeout: settings.copy_timeout(),
                    });
                }
                Ok(_) => tracing::debug!(candidate, "not present in container"),
                Err(e) => tracing::debug!(candidate, error = %e, "probe failed"),
            }
        }
        Err(SetupError::StaticDirNotFound {
            container: container.to_string(),
            candidates: CONTAINER_STATIC_CANDIDATES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
        .into())
    }

    /// Deployment directory inside the container.
    #[must_use]
    pub fn dest(&self) -> &str {
        &self.dest
    }

    async fn exec(&self, args: &[&str]) -> Result<()> {
        let mut full = vec!["exec", self.container.as_str()];
        full.extend_from_slice(args);
        let output = run_bounded(self.runner, &self.runtime, &full, self.command_timeout).await?;
        self.check(&full, &output)
    }

    fn check(&self, args: &[&str], output: &Output) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }
        Err(SetupError::ContainerCommand {
            command: format!("{} {}", self.runtime, args.join(" ")),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into())
    }
}

impl<R: CommandRunner> DeployTarget for ContainerTarget<'_, R> {
    fn destination(&self) -> String {
        format!("{}:{}", self.container, self.dest)
    }

    async fn reset(&self) -> Result<()> {
        self.exec(&["rm", "-rf", self.dest.as_str()]).await?;
        self.exec(&["mkdir", "-p", self.dest.as_str()]).await
    }

    async fn copy_entry(&self, bundle_dir: &Path, entry: &BundleEntry) -> Result<()> {
        let path = bundle_dir.join(&entry.name);
        let source = path
            .to_str()
            .ok_or_else(|| anyhow!("{} is not valid UTF-8", path.display()))?;
        let target = format!("{}:{}/{}", self.container, self.dest, entry.name);
        let args = ["cp", source, target.as_str()];
        let output = run_bounded(self.runner, &self.runtime, &args, self.copy_timeout).await?;
        self.check(&args, &output)
    }

    async fn rewrite_base_href(&self) -> Result<BaseHrefOutcome> {
        let index = format!("{}/{ENTRY_HTML}", self.dest);
        self.exec(&["sed", "-i", CONTAINER_SED_EXPR, index.as_str()])
            .await?;
        Ok(BaseHrefOutcome::Rewritten)
    }
}
