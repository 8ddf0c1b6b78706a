//! Filesystem infrastructure: implements the `LocalFs` port with `std::fs`.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::domain::BundleEntry;

/// Production filesystem implementation of `LocalFs`.
pub struct StdFs;

impl crate::application::ports::LocalFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<BundleEntry>> {
        let mut out = Vec::new();
        for entry in
            fs::read_dir(path).with_context(|| format!("reading directory {}", path.display()))?
        {
            let entry = entry.with_context(|| format!("reading directory {}", path.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks, so a linked directory counts as a directory.
            let is_dir = entry.path().is_dir();
            out.push(BundleEntry { name, is_dir });
        }
        Ok(out)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating directory {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).with_context(|| format!("removing directory {}", path.display()))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        copy_file_preserving(from, to)
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> Result<()> {
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.with_context(|| format!("walking {}", from.display()))?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .with_context(|| format!("{} escapes {}", entry.path().display(), from.display()))?;
            let target = to.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .with_context(|| format!("creating directory {}", target.display()))?;
            } else {
                copy_file_preserving(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("writing file {}", path.display()))
    }
}

/// Copy a file with its permissions and, where the platform allows it, its
/// modification time.
fn copy_file_preserving(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
    // A read-only copy may refuse the timestamp update; the content is what matters.
    if let Err(e) = fs::metadata(from)
        .and_then(|m| m.modified())
        .and_then(|modified| File::options().write(true).open(to)?.set_modified(modified))
    {
        tracing::debug!(path = %to.display(), error = %e, "could not preserve mtime");
    }
    Ok(())
}
