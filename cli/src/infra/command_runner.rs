//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution. A deadline is applied only when the caller
//! asks for one; the child is then killed when it fires.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// `tokio::time::timeout` around `.output().await` does not kill the child
/// when the timeout fires on every platform, so this uses `tokio::select!`
/// with an explicit `child.kill()`.
#[derive(Debug, Default)]
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        execute(program, args, None).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        execute(program, args, Some(timeout)).await
    }
}

async fn execute(program: &str, args: &[&str], timeout: Option<Duration>) -> Result<Output> {
    tracing::debug!(program, ?args, ?timeout, "running");
    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    let mut stdout_handle = child.stdout.take();
    let mut stderr_handle = child.stderr.take();

    // Drain both pipes while waiting; a child that fills a pipe buffer
    // would otherwise never exit.
    let completion = async {
        let (status, stdout, stderr) = tokio::join!(
            child.wait(),
            async {
                let mut buf = Vec::new();
                if let Some(ref mut h) = stdout_handle {
                    let _ = h.read_to_end(&mut buf).await;
                }
                buf
            },
            async {
                let mut buf = Vec::new();
                if let Some(ref mut h) = stderr_handle {
                    let _ = h.read_to_end(&mut buf).await;
                }
                buf
            },
        );
        Ok::<Output, anyhow::Error>(Output {
            status: status.with_context(|| format!("waiting for {program}"))?,
            stdout,
            stderr,
        })
    };

    let output = match timeout {
        None => completion.await?,
        Some(limit) => {
            let timed_out = tokio::select! {
                result = completion => Some(result?),
                () = tokio::time::sleep(limit) => None,
            };
            match timed_out {
                Some(output) => output,
                None => {
                    let _ = child.kill().await;
                    return Err(anyhow::Error::new(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("{program} timed out after {}s", limit.as_secs()),
                    )));
                }
            }
        }
    };

    tracing::debug!(program, status = ?output.status.code(), "finished");
    Ok(output)
}
