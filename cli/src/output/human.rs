//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::deploy::DeployReport;
use crate::domain::config::ServerConfig;
use crate::domain::{DeployPlan, InstallationInfo};
use crate::output::OutputContext;

const RULE_WIDTH: usize = 60;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    fn rule(&self) {
        println!("{}", "=".repeat(RULE_WIDTH).style(self.ctx.styles.dim));
    }

    /// Render the framed title shown at the start of a run.
    pub fn render_banner(&self) {
        if self.ctx.quiet {
            return;
        }
        self.rule();
        println!("  {}", "LuteForMobile PWA Setup".style(self.ctx.styles.header));
        self.rule();
        println!();
    }

    /// Render where the Lute server was found.
    pub fn render_installation(&self, info: &InstallationInfo) {
        self.ctx.kv("Installation:", &info.kind().to_string());
        match info {
            InstallationInfo::Venv {
                static_path,
                install_root,
            }
            | InstallationInfo::Source {
                static_path,
                install_root,
            } => {
                self.ctx.kv("Install root:", &install_root.display().to_string());
                self.ctx.kv("Static dir:", &static_path.display().to_string());
            }
            InstallationInfo::Docker { container_name } => {
                self.ctx.kv("Container:", container_name);
            }
        }
    }

    /// Render what a deployment would copy and skip.
    pub fn render_plan(&self, plan: &DeployPlan, destination: &str) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header(&format!("Would deploy to {destination}:"));
        for entry in &plan.copy {
            let suffix = if entry.is_dir { "/" } else { "" };
            println!("    + {}{suffix}", entry.name);
        }
        for name in &plan.skipped {
            println!("    {}", format!("- {name} (skipped)").style(self.ctx.styles.dim));
        }
        println!();
        self.ctx.info("Dry run: nothing was written.");
    }

    /// Render the closing summary and usage hint.
    pub fn render_complete(&self, report: &DeployReport, server: &ServerConfig) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.rule();
        println!("  {}", "Deployment complete".style(self.ctx.styles.success));
        self.rule();
        println!();
        self.ctx.kv("Deployed:", &report.destination);
        self.ctx
            .kv("Files:", &format!("{} copied, {} skipped", report.copied.len(), report.skipped.len()));
        println!();
        println!("  Open the app at:");
        println!("    {}", server.app_url().style(self.ctx.styles.bold));
        println!();
        println!("  In the app, set Server URL to:");
        println!("    {}", server.server_url().style(self.ctx.styles.bold));
        println!();
        println!("  For more info, see PWA_SETUP_GUIDE.md");
        println!();
    }
}
