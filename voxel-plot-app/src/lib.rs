//! voxel-plot Application Library
//!
//! This crate contains the configuration, rendering, and pipeline setup
//! for the voxel-plot application.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod render;
pub mod setup;
pub mod visualization;

use clap::Parser;

pub use config::{AppConfig, Settings};
pub use error::AppError;

/// Parses the command line and runs the load, build and render pipeline.
pub fn run() -> anyhow::Result<()> {
    run_with(AppConfig::parse())
}

/// Runs the application with already-parsed command-line arguments.
pub fn run_with(cli: AppConfig) -> anyhow::Result<()> {
    let settings = Settings::load(&cli)?;
    logging::init_logger(settings.log_level);

    log::info!("voxel-plot starting");
    log::debug!("Resolved settings: {:?}", settings);

    setup::execution::run_pipeline(&settings)?;

    log::info!("voxel-plot finished");
    Ok(())
}
