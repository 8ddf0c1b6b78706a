//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod bundle_locator;
pub mod deploy;
pub mod installation_detector;

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::CommandRunner;

/// Run a program, bounded by `timeout` only when one is configured.
pub(crate) async fn run_bounded(
    runner: &impl CommandRunner,
    program: &str,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<Output> {
    match timeout {
        Some(limit) => runner.run_with_timeout(program, args, limit).await,
        None => runner.run(program, args).await,
    }
}
