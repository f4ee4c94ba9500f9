mod aggregate;
mod analysis;
mod budget;
mod categorize;
mod config;
mod error;
mod forecast;
mod import;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let categories_path = get_categories_path()?;
    run::as_cli(&args, &categories_path)
}

/// Diagnostics go to stderr so they never mix with report output or the
/// dashboard. Filter comes from `SPENDCAST_LOG`, defaulting to warnings.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPENDCAST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn get_categories_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendcast", "Spendcast")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("categories.json"))
}
