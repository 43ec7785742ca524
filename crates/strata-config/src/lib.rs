//! Configuration for the Strata terrain tools.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line via clap, and are checked for changes on reload.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, FlythroughConfig, TerrainConfig, default_config_dir};
pub use error::ConfigError;
