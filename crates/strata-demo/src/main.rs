//! Headless terrain LOD flythrough.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags, e.g. `cargo run -p strata-demo -- --lod-ranges 400,200,100 --frames 60`.

mod flythrough;

use std::process::ExitCode;

use clap::Parser;
use strata_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match default_config_dir(args.config.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let mut surface = match flythrough::build_surface(&config.terrain) {
        Ok(surface) => surface,
        Err(e) => {
            error!("Failed to build terrain: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        depth = surface.tree().max_depth(),
        nodes = surface.tree().node_count(),
        frames = config.flythrough.frames,
        "Starting flythrough"
    );

    let report = flythrough::run(&mut surface, &config.flythrough);
    info!(
        frames = report.frames,
        min_leaves = report.min_leaves,
        max_leaves = report.max_leaves,
        total_splits = report.total_splits,
        max_level_step = report.max_level_step,
        frames_over_two_to_one = report.frames_over_two_to_one,
        "Flythrough complete"
    );

    ExitCode::SUCCESS
}
