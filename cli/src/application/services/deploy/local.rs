//! Deploy target for installs reachable through the local filesystem
//! (venv and source checkouts).

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{DeployTarget, LocalFs};
use crate::domain::bundle::{DEPLOY_SUBDIR, ENTRY_HTML};
use crate::domain::{BaseHrefOutcome, BundleEntry, rewrite_base_href};

/// Deploys into `<static_path>/luteformobile/`.
pub struct LocalTarget<'a, F: LocalFs> {
    fs: &'a F,
    dest: PathBuf,
}

impl<'a, F: LocalFs> LocalTarget<'a, F> {
    #[must_use]
    pub fn new(fs: &'a F, static_path: &Path) -> Self {
        Self {
            fs,
            dest: static_path.join(DEPLOY_SUBDIR),
        }
    }

    #[must_use]
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

impl<F: LocalFs> DeployTarget for LocalTarget<'_, F> {
    fn destination(&self) -> String {
        self.dest.display().to_string()
    }

    async fn reset(&self) -> Result<()> {
        if self.fs.exists(&self.dest) {
            self.fs.remove_dir_all(&self.dest)?;
        }
        self.fs.create_dir_all(&self.dest)
    }

    async fn copy_entry(&self, bundle_dir: &Path, entry: &BundleEntry) -> Result<()> {
        let from = bundle_dir.join(&entry.name);
        let to = self.dest.join(&entry.name);
        if entry.is_dir {
            self.fs.copy_dir_all(&from, &to)
        } else {
            self.fs.copy_file(&from, &to)
        }
    }

    async fn rewrite_base_href(&self) -> Result<BaseHrefOutcome> {
        let index = self.dest.join(ENTRY_HTML);
        if !self.fs.is_file(&index) {
            return Ok(BaseHrefOutcome::EntryMissing);
        }
        let html = self.fs.read_to_string(&index)?;
        match rewrite_base_href(&html) {
            Some(rewritten) => {
                self.fs.write(&index, &rewritten)?;
                Ok(BaseHrefOutcome::Rewritten)
            }
            None => Ok(BaseHrefOutcome::NoMarker),
        }
    }
}
