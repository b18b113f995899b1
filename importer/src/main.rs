use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod error;

use config::Paths;
use error::MigrationError;

#[derive(Debug, Parser)]
#[command(
    name = "filter-import",
    version,
    about = "Import existing SeaFlow filter parameters as per-cruise filter and filter plan files"
)]
struct Cli {
    /// seaflow-sfl git repo clone dir
    #[arg(short = 's', long, value_name = "DIR")]
    seaflow_sfl: Option<PathBuf>,
    /// seaflow-filter git repo clone dir
    #[arg(short = 'f', long, value_name = "DIR")]
    seaflow_filter: Option<PathBuf>,
    /// Output dir. A new cruises/ directory is created inside it.
    #[arg(short = 'o', long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Optional config file (YAML). If omitted, loads ./filter-import.yaml if present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();
}

fn run(paths: &Paths) -> Result<usize, MigrationError> {
    let starts = sfl_starts::read_starts(&paths.seaflow_sfl).map_err(MigrationError::ReadStarts)?;
    let params = filter_params::read_params(&paths.seaflow_filter).map_err(MigrationError::ReadParams)?;
    filter_output::write_params(&starts, &params, &paths.out_dir).map_err(MigrationError::Write)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded_cfg = config::load_config(cli.config.as_deref())?;
    init_tracing(loaded_cfg.as_ref().and_then(|c| c.log.as_deref()).unwrap_or("warn"));
    debug!(version = filter_import_core::version(), config = ?loaded_cfg, "starting");

    let paths = config::resolve_paths(cli.seaflow_sfl, cli.seaflow_filter, cli.out_dir, loaded_cfg.as_ref())?;
    let written = run(&paths)?;
    eprintln!("Wrote filter parameters for {} cruises", written);
    Ok(())
}
