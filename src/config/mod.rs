//! Configuration file support for stickpaint.
//!
//! This module handles loading and validating settings from the configuration
//! file located at `~/.config/stickpaint/config.toml`. Settings cover canvas
//! geometry, stick tuning, gesture thresholds, the color wheel, tool sizes,
//! undo depth and loop pacing.
//!
//! If no config file exists, the reference board defaults are used.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, Rotation};
pub use types::{
    CalibrationConfig, CanvasConfig, ColorWheelConfig, GestureConfig, HistoryConfig,
    MotionConfig, RuntimeConfig, ToolConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have defaults matching the 480x320 reference board.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 480
/// height = 320
/// background = "white"
///
/// [motion]
/// deadzone = 120
/// divisor = 200.0
///
/// [history]
/// max_undos = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas geometry and panel orientation
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Stick motion tuning
    #[serde(default)]
    pub motion: MotionConfig,

    /// Rest-position calibration
    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// Tap/hold thresholds
    #[serde(default)]
    pub gestures: GestureConfig,

    /// Color wheel behaviour
    #[serde(default)]
    pub color_wheel: ColorWheelConfig,

    /// Brush and eraser sizes
    #[serde(default)]
    pub tools: ToolConfig,

    /// Undo history depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Main loop pacing
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged. Validated ranges:
    /// - `cursor_margin`: 4 - 32
    /// - canvas edges: at least one overlay plus one pixel
    /// - `divisor`: > 0, `max_speed`: 0.5 - 64
    /// - tool sizes: 1 - `cursor_margin - 1` so the ring fits the overlay
    /// - `max_undos`: 1 - 64
    /// - `min_factor`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        if !(4..=32).contains(&self.motion.cursor_margin) {
            log::warn!(
                "Invalid cursor_margin {}, clamping to 4-32 range",
                self.motion.cursor_margin
            );
            self.motion.cursor_margin = self.motion.cursor_margin.clamp(4, 32);
        }

        let min_edge = 2 * self.motion.cursor_margin as usize + 1;
        if self.canvas.width < min_edge {
            log::warn!(
                "Canvas width {} cannot fit the cursor overlay, using {}",
                self.canvas.width,
                min_edge
            );
            self.canvas.width = min_edge;
        }
        if self.canvas.height < min_edge {
            log::warn!(
                "Canvas height {} cannot fit the cursor overlay, using {}",
                self.canvas.height,
                min_edge
            );
            self.canvas.height = min_edge;
        }

        if self.motion.deadzone < 0 {
            log::warn!("Negative deadzone {}, using 0", self.motion.deadzone);
            self.motion.deadzone = 0;
        }

        if !(self.motion.divisor.is_finite() && self.motion.divisor > 0.0) {
            log::warn!("Invalid divisor {:.1}, falling back to 200.0", self.motion.divisor);
            self.motion.divisor = 200.0;
        }

        if !self.motion.max_speed.is_finite() {
            let fallback = MotionConfig::default().max_speed;
            log::warn!(
                "Invalid max_speed {}, falling back to {fallback:.1}",
                self.motion.max_speed
            );
            self.motion.max_speed = fallback;
        } else if !(0.5..=64.0).contains(&self.motion.max_speed) {
            log::warn!(
                "Invalid max_speed {:.1}, clamping to 0.5-64.0 range",
                self.motion.max_speed
            );
            self.motion.max_speed = self.motion.max_speed.clamp(0.5, 64.0);
        }

        if self.calibration.samples == 0 {
            log::warn!("Calibration needs at least one sample, using 1");
            self.calibration.samples = 1;
        }

        let max_size = self.motion.cursor_margin - 1;
        for (name, table) in [
            ("brush_sizes", &mut self.tools.brush_sizes),
            ("eraser_sizes", &mut self.tools.eraser_sizes),
        ] {
            for size in table.iter_mut() {
                if !(1..=max_size).contains(size) {
                    log::warn!("Invalid {name} entry {size}, clamping to 1-{max_size} range");
                    *size = (*size).clamp(1, max_size);
                }
            }
        }

        if !(1..=64).contains(&self.history.max_undos) {
            log::warn!(
                "Invalid max_undos {}, clamping to 1-64 range",
                self.history.max_undos
            );
            self.history.max_undos = self.history.max_undos.clamp(1, 64);
        }

        if !self.color_wheel.min_factor.is_finite() {
            let fallback = ColorWheelConfig::default().min_factor;
            log::warn!(
                "Invalid min_factor {}, falling back to {fallback:.2}",
                self.color_wheel.min_factor
            );
            self.color_wheel.min_factor = fallback;
        } else if !(0.0..=1.0).contains(&self.color_wheel.min_factor) {
            log::warn!(
                "Invalid min_factor {:.2}, clamping to 0.0-1.0 range",
                self.color_wheel.min_factor
            );
            self.color_wheel.min_factor = self.color_wheel.min_factor.clamp(0.0, 1.0);
        }

        if !(self.color_wheel.full_scale.is_finite() && self.color_wheel.full_scale > 0.0) {
            log::warn!(
                "Invalid full_scale {:.1}, falling back to 1500.0",
                self.color_wheel.full_scale
            );
            self.color_wheel.full_scale = 1500.0;
        }

        if !self.color_wheel.center_radius.is_finite() {
            let fallback = ColorWheelConfig::default().center_radius;
            log::warn!(
                "Invalid center_radius {}, falling back to {fallback:.1}",
                self.color_wheel.center_radius
            );
            self.color_wheel.center_radius = fallback;
        } else if self.color_wheel.center_radius < 0.0 {
            log::warn!("Negative center_radius, using 0.0");
            self.color_wheel.center_radius = 0.0;
        }

        if !(1..=1000).contains(&self.runtime.tick_ms) {
            log::warn!(
                "Invalid tick_ms {}, clamping to 1-1000 range",
                self.runtime.tick_ms
            );
            self.runtime.tick_ms = self.runtime.tick_ms.clamp(1, 1000);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/stickpaint/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("stickpaint");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists at the target path or the
    /// directory/file cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.canvas.width, 480);
        assert_eq!(config.canvas.height, 320);
        assert_eq!(config.history.max_undos, 20);
        assert_eq!(config.calibration.samples, 50);
        assert_eq!(config.gestures.wheel_hold_ms, 300);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[history]\nmax_undos = 5\n\n[motion]\ninvert_y = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.history.max_undos, 5);
        assert!(config.motion.invert_y);
        assert_eq!(config.motion.deadzone, 120);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.history.max_undos = 0;
        config.tools.brush_sizes = [0, 5, 99];
        config.calibration.samples = 0;
        config.canvas.width = 10;
        config.motion.divisor = 0.0;
        config.color_wheel.min_factor = 3.0;
        config.validate_and_clamp();

        assert_eq!(config.history.max_undos, 1);
        assert_eq!(config.tools.brush_sizes, [1, 5, 17]);
        assert_eq!(config.calibration.samples, 1);
        assert_eq!(config.canvas.width, 37);
        assert_eq!(config.motion.divisor, 200.0);
        assert_eq!(config.color_wheel.min_factor, 1.0);
    }

    #[test]
    fn non_finite_floats_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[motion]\nmax_speed = nan\ndivisor = inf\n\n\
             [color_wheel]\nmin_factor = nan\ncenter_radius = nan\nfull_scale = -inf\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.motion.max_speed, 10.0);
        assert_eq!(config.motion.divisor, 200.0);
        assert_eq!(config.color_wheel.min_factor, 0.25);
        assert_eq!(config.color_wheel.center_radius, 300.0);
        assert_eq!(config.color_wheel.full_scale, 1500.0);
    }

    #[test]
    fn nan_max_speed_still_moves_the_cursor() {
        use crate::input::{Calibration, MotionIntegrator};

        let mut config = Config::default();
        config.motion.max_speed = f32::NAN;
        config.validate_and_clamp();

        let motion = MotionIntegrator::new(&config.motion, 480, 320);
        let mut position = motion.home();
        motion.integrate(&mut position, &Calibration::new(2048.0, 2048.0), 4048, 2048);
        assert_eq!(position.pixel(), (250, 160));
    }

    #[test]
    fn nan_center_radius_keeps_anchor_at_rest() {
        use crate::draw::{BLACK, ColorWheel, PaletteMode};

        let mut config = Config::default();
        config.color_wheel.center_radius = f32::NAN;
        config.validate_and_clamp();

        let wheel = ColorWheel::new(&config.color_wheel);
        assert_eq!(wheel.color_at(0.0, 0.0, PaletteMode::Dark), BLACK);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.canvas.rotation, Rotation::Landscape);
        assert_eq!(config.tools.eraser_sizes, [5, 10, 16]);
    }

    #[test]
    fn create_default_file_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(path.exists());
        assert!(Config::create_default_file(&path).is_err());
    }
}
