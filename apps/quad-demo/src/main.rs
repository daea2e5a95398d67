use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use quadray_core::DemoConfig;
use quadray_core::error::EXIT_FAILURE;

#[derive(Parser)]
#[command(name = "quadray-quad-demo", about = "Draw a colored quad; Escape quits")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding the built-in settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DemoConfig::load(path, DemoConfig::quad())?,
        None => DemoConfig::quad(),
    };
    quadray_render_wgpu::launch(config)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    tracing::info!("quad demo starting");

    let code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{err:#}");
            err.downcast_ref::<quadray_core::DemoError>()
                .map_or(EXIT_FAILURE, |e| e.exit_code())
        }
    };
    std::process::exit(code);
}
