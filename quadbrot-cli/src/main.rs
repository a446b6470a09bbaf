mod args;
mod config;
mod driver;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use crate::args::Args;
use crate::config::RenderConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    args.apply(&mut config);

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    info!(
        images = config.offsets.len(),
        grid_size = config.engine.grid_size,
        "Starting quadbrot"
    );
    let written = driver::render_all(&config)?;
    info!(count = written.len(), dir = %config.output_dir.display(), "Done");
    Ok(())
}
