//! Deploy command: locate the bundle, find Lute, copy the app in.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{DeployTarget, ProgressReporter};
use crate::application::services::bundle_locator::locate_bundle;
use crate::application::services::deploy::{
    ContainerTarget, LocalTarget, deploy_bundle, plan_deployment,
};
use crate::application::services::installation_detector::{DetectOptions, detect_installation};
use crate::domain::{BundlePath, DeployPlan, InstallationInfo, SetupError};
use crate::output::{TerminalReporter, json};

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Built web app directory, or a project with a build/web output
    #[arg(long, env = "LUTE_PWA_BUNDLE", value_name = "DIR")]
    pub bundle: Option<PathBuf>,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the bundle or installation cannot be found, or any
/// deployment step fails.
pub async fn run(app: &AppContext, args: &DeployArgs) -> Result<()> {
    let renderer = app.renderer();
    renderer.render_banner();
    let reporter = TerminalReporter::new(&app.output);

    let search_dir = args.bundle.as_deref().unwrap_or(app.base_dir.as_path());
    let bundle = locate_bundle(&app.fs, search_dir)?;
    reporter.success(&format!(
        "found app bundle at {}",
        bundle.as_path().display()
    ));

    let opts = DetectOptions {
        home: &app.home,
        base_dir: &app.base_dir,
        container: &app.config.container,
    };
    let info = detect_installation(&app.fs, &app.runner, &opts, &reporter)
        .await?
        .ok_or(SetupError::InstallationNotFound)?;
    reporter.step(&format!("deploying app (installation type: {})", info.kind()));

    let plan = plan_deployment(&app.fs, &bundle)?;
    let job = Job {
        app,
        bundle: &bundle,
        plan: &plan,
        dry_run: args.dry_run,
        reporter: &reporter,
    };

    match &info {
        InstallationInfo::Venv { static_path, .. } | InstallationInfo::Source { static_path, .. } => {
            job.run(&LocalTarget::new(&app.fs, static_path)).await
        }
        InstallationInfo::Docker { container_name } => {
            let target = ContainerTarget::resolve(
                &app.runner,
                &app.config.container,
                container_name,
                &reporter,
            )
            .await?;
            job.run(&target).await
        }
    }
}

/// Everything but the target, so each installation kind shares one path.
struct Job<'a> {
    app: &'a AppContext,
    bundle: &'a BundlePath,
    plan: &'a DeployPlan,
    dry_run: bool,
    reporter: &'a TerminalReporter<'a>,
}

impl Job<'_> {
    async fn run(&self, target: &impl DeployTarget) -> Result<()> {
        if self.dry_run {
            self.reporter.finish();
            return if self.app.is_json() {
                println!("{}", json::format_plan(self.plan, &target.destination())?);
                Ok(())
            } else {
                self.app
                    .renderer()
                    .render_plan(self.plan, &target.destination());
                Ok(())
            };
        }

        let report = deploy_bundle(target, self.bundle, self.plan, self.reporter).await?;
        self.reporter.finish();

        if self.app.is_json() {
            json::print(&report)
        } else {
            self.app
                .renderer()
                .render_complete(&report, &self.app.config.server);
            Ok(())
        }
    }
}
