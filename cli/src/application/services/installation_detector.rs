//! Application service: find the Lute installation to deploy into.
//!
//! Probes run in a fixed order (venv, then container, then source checkout)
//! and the first hit wins. Absence is a normal outcome and is reported as
//! `Ok(None)`, never as an error.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::application::services::run_bounded;
use crate::domain::config::ContainerConfig;
use crate::domain::installation::{
    InstallationInfo, VENV_DIR, parse_container_name, python_version_from_dir_name,
    source_candidates, source_static_path, venv_candidates, venv_static_path,
};

/// Inputs of a detection run.
pub struct DetectOptions<'a> {
    /// User home directory.
    pub home: &'a Path,
    /// Directory the tool runs from; its parent is a source-checkout candidate.
    pub base_dir: &'a Path,
    /// Container runtime settings.
    pub container: &'a ContainerConfig,
}

/// Classify the host installation.
///
/// # Errors
///
/// Returns an error only for unexpected I/O failures (an unreadable venv
/// `lib` directory, or a container runtime that cannot be spawned for
/// reasons other than being absent).
pub async fn detect_installation(
    fs: &impl LocalFs,
    runner: &impl CommandRunner,
    opts: &DetectOptions<'_>,
    reporter: &impl ProgressReporter,
) -> Result<Option<InstallationInfo>> {
    reporter.step("detecting Lute installation...");

    if let Some(info) = probe_venv(fs, opts.home, reporter)? {
        return Ok(Some(info));
    }
    if let Some(info) = probe_container(runner, opts.container, reporter).await? {
        return Ok(Some(info));
    }
    if let Some(info) = probe_source(fs, opts.home, opts.base_dir, reporter) {
        return Ok(Some(info));
    }

    reporter.warn("could not find a Lute installation");
    Ok(None)
}

fn probe_venv(
    fs: &impl LocalFs,
    home: &Path,
    reporter: &impl ProgressReporter,
) -> Result<Option<InstallationInfo>> {
    for root in venv_candidates(home) {
        if !fs.exists(&root) {
            continue;
        }
        let venv = root.join(VENV_DIR);
        if !fs.exists(&venv) {
            tracing::debug!(root = %root.display(), "no venv");
            continue;
        }
        reporter.success(&format!("found Lute at {} (with venv)", root.display()));

        let Some(version) = find_python_version(fs, &venv)? else {
            tracing::debug!(venv = %venv.display(), "no python3.x library directory");
            continue;
        };
        reporter.step(&format!("Python version: {version}"));

        let static_path = venv_static_path(&venv, &version);
        if fs.exists(&static_path) {
            return Ok(Some(InstallationInfo::Venv {
                static_path,
                install_root: root,
            }));
        }
        tracing::debug!(path = %static_path.display(), "venv has no lute static dir");
    }
    Ok(None)
}

/// Version of the first `lib/python3.<minor>` directory, by sorted name.
fn find_python_version(fs: &impl LocalFs, venv: &Path) -> Result<Option<String>> {
    let lib = venv.join("lib");
    if !fs.exists(&lib) {
        return Ok(None);
    }
    let mut entries = fs.list_dir(&lib)?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries
        .iter()
        .filter(|e| e.is_dir)
        .find_map(|e| python_version_from_dir_name(&e.name))
        .map(str::to_string))
}

async fn probe_container(
    runner: &impl CommandRunner,
    settings: &ContainerConfig,
    reporter: &impl ProgressReporter,
) -> Result<Option<InstallationInfo>> {
    let filter = format!("name={}", settings.name_filter);
    let args = ["ps", "--filter", filter.as_str(), "--format", "{{.Names}}"];
    let listing = run_bounded(runner, &settings.runtime, &args, settings.command_timeout()).await;

    let output = match listing {
        Ok(output) => output,
        Err(e) if is_program_missing(&e) => {
            tracing::debug!(runtime = %settings.runtime, "container runtime not installed");
            return Ok(None);
        }
        Err(e) if is_timed_out(&e) => {
            reporter.warn(&format!(
                "{} did not answer in time; skipping containers",
                settings.runtime
            ));
            tracing::debug!(runtime = %settings.runtime, error = %e, "container listing timed out");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if !output.status.success() {
        tracing::debug!(
            runtime = %settings.runtime,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "container listing failed"
        );
        return Ok(None);
    }

    let Some(container_name) = parse_container_name(&String::from_utf8_lossy(&output.stdout))
    else {
        return Ok(None);
    };
    reporter.success(&format!("found container: {container_name}"));
    Ok(Some(InstallationInfo::Docker { container_name }))
}

fn probe_source(
    fs: &impl LocalFs,
    home: &Path,
    base_dir: &Path,
    reporter: &impl ProgressReporter,
) -> Option<InstallationInfo> {
    source_candidates(home, base_dir)
        .into_iter()
        .find_map(|root| {
            let static_path = source_static_path(&root);
            fs.exists(&static_path).then(|| {
                reporter.success(&format!("found Lute source at {}", root.display()));
                InstallationInfo::Source {
                    static_path,
                    install_root: root,
                }
            })
        })
}

/// Whether `err` stems from the program not existing on `PATH`.
pub(crate) fn is_program_missing(err: &anyhow::Error) -> bool {
    has_io_kind(err, ErrorKind::NotFound)
}

/// Whether `err` stems from a deadline the runner enforced.
pub(crate) fn is_timed_out(err: &anyhow::Error) -> bool {
    has_io_kind(err, ErrorKind::TimedOut)
}

fn has_io_kind(err: &anyhow::Error, kind: ErrorKind) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == kind)
    })
}
