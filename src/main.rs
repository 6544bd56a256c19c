mod app;
mod config;
mod overlay;
mod render;
mod terminal_input;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "boxdude")]
#[command(about = "A squishy little box that runs, jumps and blinks in your terminal", long_about = None)]
pub(crate) struct Args {
    /// FPS cap (clamped to 10..=240)
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// Seed for the random blinks
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// World width in world pixels
    #[arg(long)]
    pub(crate) width: Option<f32>,

    /// World height in world pixels
    #[arg(long)]
    pub(crate) height: Option<f32>,

    /// Monochrome output
    #[arg(long, default_value_t = false)]
    pub(crate) no_color: bool,

    /// Skip the help text overlay
    #[arg(long, default_value_t = false)]
    pub(crate) no_instructions: bool,

    /// Settings file (JSON). Defaults to the platform config dir.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Log file. Defaults to the platform data dir.
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = config::project_paths().ok();

    // the terminal belongs to the renderer, so logs go to a file
    match (&args.log_file, &paths) {
        (Some(path), _) => init_logging(path, &args.log_level)?,
        // no writable default location just means no logs
        (None, Some(p)) => init_logging(&p.log_path, &args.log_level).unwrap_or(()),
        (None, None) => {}
    }

    let settings_path = args
        .config
        .clone()
        .or_else(|| paths.as_ref().map(|p| p.settings_path.clone()));
    let settings = settings_path
        .map(|p| config::load_settings(&p))
        .unwrap_or_default()
        .with_overrides(&args);

    app::run(settings)
}

fn init_logging(path: &Path, default_level: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
