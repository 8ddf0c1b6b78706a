//! Detect command: report the installation a deploy would target.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::installation_detector::{DetectOptions, detect_installation};
use crate::domain::SetupError;
use crate::output::{TerminalReporter, json};

/// Run the detect command.
///
/// # Errors
///
/// Returns [`SetupError::InstallationNotFound`] when nothing is found.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    let opts = DetectOptions {
        home: &app.home,
        base_dir: &app.base_dir,
        container: &app.config.container,
    };
    let found = detect_installation(&app.fs, &app.runner, &opts, &reporter).await?;
    reporter.finish();

    let info = found.ok_or(SetupError::InstallationNotFound)?;
    if app.is_json() {
        json::print(&info)
    } else {
        app.output.blank();
        app.renderer().render_installation(&info);
        Ok(())
    }
}
