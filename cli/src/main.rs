//! lute-pwa-setup - Deploy the LuteForMobile web app into a Lute server

use clap::Parser;
use owo_colors::OwoColorize as _;
use owo_colors::Stream::Stderr;
use tracing_subscriber::EnvFilter;

use luteformobile_setup::cli::Cli;
use luteformobile_setup::domain::SetupError;
use luteformobile_setup::output::json;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_mode = cli.json;
    if let Err(e) = cli.run().await {
        report_error(&e, json_mode);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,luteformobile_setup={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(err: &anyhow::Error, json_mode: bool) {
    let setup = err.downcast_ref::<SetupError>();
    if json_mode {
        let code = setup.map_or("error", SetupError::code);
        match json::format_error(&format!("{err:#}"), code) {
            Ok(obj) => println!("{obj}"),
            Err(_) => eprintln!("Error: {err:#}"),
        }
        return;
    }
    eprintln!(
        "{} {err:#}",
        "Error:".if_supports_color(Stderr, |t| t.red())
    );
    if let Some(hint) = setup.and_then(SetupError::hint) {
        eprintln!();
        for line in hint.lines() {
            eprintln!("  {line}");
        }
    }
}
