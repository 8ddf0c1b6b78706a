//! Application service: find the built web app bundle.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::SetupError;
use crate::domain::bundle::{BundlePath, COMPILED_APP, ENTRY_HTML, bundle_candidates};

/// Return the first candidate under `base_dir` holding both the entry HTML
/// and the compiled app.
///
/// # Errors
///
/// Returns [`SetupError::BundleNotFound`] when no candidate qualifies.
pub fn locate_bundle(fs: &impl LocalFs, base_dir: &Path) -> Result<BundlePath, SetupError> {
    let candidates = bundle_candidates(base_dir);
    for dir in &candidates {
        if fs.is_file(&dir.join(ENTRY_HTML)) && fs.is_file(&dir.join(COMPILED_APP)) {
            tracing::debug!(dir = %dir.display(), "bundle found");
            return Ok(BundlePath::confirmed(dir.clone()));
        }
        tracing::debug!(dir = %dir.display(), "no bundle");
    }
    Err(SetupError::BundleNotFound {
        searched: candidates.to_vec(),
    })
}
