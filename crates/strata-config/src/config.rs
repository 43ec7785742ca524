//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain quadtree and placement.
    pub terrain: TerrainConfig,
    /// Headless viewer path used by the demo.
    pub flythrough: FlythroughConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain quadtree configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Split distance per depth, coarsest first. The length is the maximum
    /// tree depth.
    pub lod_ranges: Vec<f64>,
    /// Terrain-local edge length of the root patch.
    pub scale: f64,
    /// World position of the terrain's lower corner.
    pub offset: [f64; 3],
    /// Uniform world scale applied to the whole terrain.
    pub world_scale: f64,
}

/// Viewer path for the headless flythrough.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlythroughConfig {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Viewer world position on the first frame.
    pub start: [f64; 3],
    /// Viewer world position on the last frame.
    pub end: [f64; 3],
    /// Log a frame summary every this many frames (0 = only the report).
    pub report_every: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g. "debug", "info,strata_lod=trace").
    pub log_level: String,
    /// Also write JSON logs to the config directory in debug builds.
    pub log_to_file: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            lod_ranges: vec![1024.0, 512.0, 256.0, 128.0, 64.0, 32.0],
            scale: 2048.0,
            offset: [0.0; 3],
            world_scale: 1.0,
        }
    }
}

impl Default for FlythroughConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            start: [-256.0, 40.0, 1024.0],
            end: [2304.0, 40.0, 1024.0],
            report_every: 30,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

/// Resolve the config directory: an explicit override, or the platform
/// config directory joined with `strata`.
pub fn default_config_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => dirs::config_dir()
            .map(|dir| dir.join("strata"))
            .ok_or(ConfigError::NoConfigDir),
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            if new_config.terrain.lod_ranges.len() != self.terrain.lod_ranges.len() {
                log::info!(
                    "Config reloaded: LOD depth {} -> {}",
                    self.terrain.lod_ranges.len(),
                    new_config.terrain.lod_ranges.len()
                );
            } else {
                log::info!("Config reloaded with changes");
            }
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("scale: 2048.0"));
        assert!(ron_str.contains("frames: 240"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.terrain.lod_ranges = vec![300.0, 150.0, 75.0];
        config.terrain.offset = [-1.5, 2.0, 8.25];
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(terrain: (scale: 512.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.scale, 512.0);
        assert_eq!(config.terrain.lod_ranges, TerrainConfig::default().lod_ranges);
        assert_eq!(config.flythrough, FlythroughConfig::default());
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_empty_ranges_parse() {
        let config: Config = ron::from_str("(terrain: (lod_ranges: []))").unwrap();
        assert!(config.terrain.lod_ranges.is_empty());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.world_scale = 4.0;
        config.flythrough.frames = 12;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.lod_ranges.push(16.0);
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().terrain.lod_ranges.len(), 7);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let dir = default_config_dir(Some(Path::new("/tmp/strata-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/strata-test"));
    }
}
