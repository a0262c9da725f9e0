//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use relief_terrain::{ControlPoint, DiamondSquareParams, RandomKind};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "relief.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Height field generator settings.
    pub generator: GeneratorConfig,
    /// Heights fixed before generation.
    pub control_points: Vec<ControlPoint>,
    /// Output image settings.
    pub view: ViewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Diamond-square generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chunk side is `2^chunk_exponent`.
    pub chunk_exponent: u32,
    /// Height used in place of missing neighbors while averaging.
    pub outside_baseline: f64,
    /// Median window width for edge smoothing.
    pub filter_window: u32,
    /// Displacement roughness `R`.
    pub roughness: f64,
    /// Random seed.
    pub seed: u64,
    /// Random source implementation.
    pub random: RandomKind,
    /// Side of the square region generated up front (0 = none).
    pub pregenerate_extent: u32,
}

/// Viewport and image output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Image width in pixels (one pixel per sample).
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Horizontal pan offset in samples.
    pub offset_x: i32,
    /// Vertical pan offset in samples.
    pub offset_y: i32,
    /// Output PNG path.
    pub output: PathBuf,
    /// Background color for unpainted pixels.
    pub background: String,
    /// Draw the color legend in the top-left corner.
    pub legend: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the config directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chunk_exponent: 6,
            outside_baseline: 0.0,
            filter_window: 3,
            roughness: 1.0,
            seed: 0,
            random: RandomKind::ChaCha,
            pregenerate_extent: 500,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            offset_x: 0,
            offset_y: 0,
            output: PathBuf::from("heightmap.png"),
            background: "#ffffff".to_string(),
            legend: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl GeneratorConfig {
    /// Converts to validated generator parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGenerator`] if the chunk exponent is out
    /// of range or a parameter is not finite.
    pub fn to_params(&self) -> Result<DiamondSquareParams, ConfigError> {
        let params = DiamondSquareParams {
            chunk_size: DiamondSquareParams::chunk_size_for_exponent(self.chunk_exponent)?,
            outside_baseline: self.outside_baseline,
            filter_window: self.filter_window,
            roughness: self.roughness,
            seed: self.seed,
            random: self.random,
        };
        params.validate()?;
        Ok(params)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Default configuration directory (`<platform config dir>/relief`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("relief"))
    }

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

    /// Save config to the given directory as `relief.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
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
            log::info!("Config reloaded with changes");
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
        assert!(ron_str.contains("chunk_exponent: 6"));
        assert!(ron_str.contains("width: 500"));
    }

    #[test]
    fn test_config_roundtrip_with_control_points() {
        let mut config = Config::default();
        config.control_points.push(ControlPoint::new(2, -3, 40.5));
        config.generator.random = RandomKind::Sine;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(generator: (seed: 9))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.generator.seed, 9);
        assert_eq!(config.generator.chunk_exponent, 6);
        assert_eq!(config.view, ViewConfig::default());
        assert!(config.control_points.is_empty());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_generator_converts() {
        let params = GeneratorConfig::default().to_params().unwrap();
        assert_eq!(params.chunk_size, 64);
        assert_eq!(params.filter_window, 3);
    }

    #[test]
    fn test_oversized_exponent_rejected() {
        let generator = GeneratorConfig {
            chunk_exponent: 40,
            ..Default::default()
        };
        assert!(matches!(
            generator.to_params(),
            Err(ConfigError::InvalidGenerator(_))
        ));
    }

    #[test]
    fn test_oversized_filter_window_rejected() {
        let generator = GeneratorConfig {
            filter_window: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            generator.to_params(),
            Err(ConfigError::InvalidGenerator(
                relief_terrain::TerrainError::InvalidFilterWindow { .. }
            ))
        ));
    }

    #[test]
    fn test_infinite_roughness_rejected() {
        let generator = GeneratorConfig {
            roughness: f64::INFINITY,
            ..Default::default()
        };
        assert!(generator.to_params().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.generator.seed = 77;
        config.view.output = PathBuf::from("out/map.png");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
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
        modified.generator.roughness = 2.5;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().generator.roughness, 2.5);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
