//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::{parse_hex_color, parse_palette};
use crate::error::ConfigError;

const APP_NAME: &str = "nova";
const CONFIG_FILE: &str = "config.ron";

/// Top-level universe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Central planet surface.
    pub surface: SurfaceConfig,
    /// Rotating star box.
    pub starfield: StarFieldConfig,
    /// Static background sky shell.
    pub sky: SkyConfig,
    /// Hand-placed planet ring.
    pub planets: PlanetsConfig,
    /// Angular velocities and drift.
    pub motion: MotionConfig,
    /// Render loop pacing.
    pub render_loop: RenderLoopConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet surface generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Undisplaced sphere radius.
    pub base_radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Field values above this are land.
    pub threshold: f32,
    /// Outward displacement per unit of field value above the threshold.
    pub land_gain: f32,
    /// Inward displacement applied to sea vertices.
    pub sea_offset: f32,
    pub land_color: String,
    pub sea_color: String,
    /// Weight of the `|y|^exponent` polar bias added to the field.
    pub polar_weight: f32,
    pub polar_exponent: f32,
    /// Planet center in world space.
    pub position: [f32; 3],
}

/// Star box settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: usize,
    /// Half size of the box along each axis.
    pub half_extents: [f32; 3],
    pub min_size: f32,
    pub max_size: f32,
    /// Colors picked uniformly per star. Empty means untinted.
    pub palette: Vec<String>,
    /// Fixed seed for reproducible fields. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub emissive: f32,
}

/// Background sky shell settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    pub count: usize,
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness.
    pub depth: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub color: String,
    pub seed: Option<u64>,
    pub emissive: f32,
}

/// Planet ring settings. Positions and colors come from the built-in layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetsConfig {
    pub enabled: bool,
    /// Emissive intensity of the glowing planets.
    pub emissive_intensity: f32,
}

/// Angular velocities in radians per second, plus drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub planet_spin: f32,
    pub ring_speed: f32,
    pub starfield_speed: f32,
    pub sky_speed: f32,
    /// Apply the sinusoidal drift to the planet position.
    pub drift: bool,
    pub drift_frequency: f32,
    pub drift_amplitude: f32,
}

/// Render loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderLoopConfig {
    /// Clamp for a single frame's delta in seconds.
    pub max_frame_time: f32,
    /// Simulated refresh rate of the headless driver.
    pub refresh_rate_hz: f32,
    /// Frames the headless driver runs before tearing down.
    pub frames: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write JSON logs next to the config in debug builds.
    pub file_logging: bool,
}

// --- Default implementations ---

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            base_radius: 4.0,
            width_segments: 96,
            height_segments: 96,
            threshold: 0.4,
            land_gain: 0.3,
            sea_offset: 0.0,
            land_color: "#6fcf97".to_string(),
            sea_color: "#4aa3ff".to_string(),
            polar_weight: 0.35,
            polar_exponent: 1.5,
            position: [0.0, 0.0, -8.0],
        }
    }
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 60_000,
            half_extents: [60.0, 45.0, 60.0],
            min_size: 0.02,
            max_size: 0.03,
            palette: ["#ffffff", "#9fd3ff", "#ffd166", "#ff6b6b", "#c77dff", "#4cc9f0"]
                .into_iter()
                .map(String::from)
                .collect(),
            seed: None,
            emissive: 2.5,
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            count: 3_000,
            radius: 150.0,
            depth: 90.0,
            min_size: 0.05,
            max_size: 0.08,
            color: "#ffffff".to_string(),
            seed: None,
            emissive: 1.0,
        }
    }
}

impl Default for PlanetsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            emissive_intensity: 0.35,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            planet_spin: 0.4,
            ring_speed: 0.04,
            starfield_speed: 0.01,
            sky_speed: 0.0,
            drift: false,
            drift_frequency: 1.0,
            drift_amplitude: 0.1,
        }
    }
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            max_frame_time: 0.25,
            refresh_rate_hz: 60.0,
            frames: 600,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: true,
        }
    }
}

// --- Parsed colors ---

impl SurfaceConfig {
    pub fn land_rgb(&self) -> Result<[f32; 3], ConfigError> {
        parse_hex_color(&self.land_color)
    }

    pub fn sea_rgb(&self) -> Result<[f32; 3], ConfigError> {
        parse_hex_color(&self.sea_color)
    }
}

impl StarFieldConfig {
    pub fn palette_rgb(&self) -> Result<Vec<[f32; 3]>, ConfigError> {
        parse_palette(&self.palette)
    }
}

impl SkyConfig {
    pub fn color_rgb(&self) -> Result<[f32; 3], ConfigError> {
        parse_hex_color(&self.color)
    }
}

// --- Load / Save / Reload ---

/// `<platform config dir>/nova`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
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
            info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Parse every color string, returning the first failure.
    pub fn validate_colors(&self) -> Result<(), ConfigError> {
        self.surface.land_rgb()?;
        self.surface.sea_rgb()?;
        self.starfield.palette_rgb()?;
        self.sky.color_rgb()?;
        Ok(())
    }
}
