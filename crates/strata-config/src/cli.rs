//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Quadtree terrain LOD flythrough")]
pub struct CliArgs {
    /// Split distance per depth, coarsest first (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub lod_ranges: Option<Vec<f64>>,

    /// Terrain-local edge length of the root patch.
    #[arg(long)]
    pub scale: Option<f64>,

    /// Uniform world scale of the terrain.
    #[arg(long)]
    pub world_scale: Option<f64>,

    /// Number of flythrough frames.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref ranges) = args.lod_ranges {
            self.terrain.lod_ranges = ranges.clone();
        }
        if let Some(scale) = args.scale {
            self.terrain.scale = scale;
        }
        if let Some(world_scale) = args.world_scale {
            self.terrain.world_scale = world_scale;
        }
        if let Some(frames) = args.frames {
            self.flythrough.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
