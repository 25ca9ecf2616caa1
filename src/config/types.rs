//! Configuration type definitions.

use super::enums::{ColorSpec, Rotation};
use crate::draw::PaletteMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas and panel settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels after rotation
    #[serde(default = "default_width")]
    pub width: usize,

    /// Canvas height in pixels after rotation
    #[serde(default = "default_height")]
    pub height: usize,

    /// Blank canvas color, also painted by the eraser and by clear
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Panel rotation applied at startup
    #[serde(default = "default_rotation")]
    pub rotation: Rotation,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            rotation: default_rotation(),
        }
    }
}

/// Stick-to-cursor motion tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MotionConfig {
    /// Raw deflection below this magnitude is ignored (jitter suppression)
    #[serde(default = "default_deadzone")]
    pub deadzone: i32,

    /// Raw deflection units per pixel of cursor travel per tick
    #[serde(default = "default_divisor")]
    pub divisor: f32,

    /// Maximum cursor travel per tick in pixels
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,

    /// Half the cursor overlay size; the cursor never gets closer to an edge
    #[serde(default = "default_cursor_margin")]
    pub cursor_margin: i32,

    /// Flip the horizontal axis
    #[serde(default)]
    pub invert_x: bool,

    /// Flip the vertical axis
    #[serde(default)]
    pub invert_y: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            deadzone: default_deadzone(),
            divisor: default_divisor(),
            max_speed: default_max_speed(),
            cursor_margin: default_cursor_margin(),
            invert_x: false,
            invert_y: false,
        }
    }
}

/// Startup calibration of the stick rest position.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CalibrationConfig {
    /// Samples averaged per axis
    #[serde(default = "default_samples")]
    pub samples: u32,

    /// Delay between samples in milliseconds
    #[serde(default = "default_sample_delay_ms")]
    pub sample_delay_ms: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            sample_delay_ms: default_sample_delay_ms(),
        }
    }
}

/// Tap-versus-hold thresholds per button, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Hold on the tool button toggles the eraser
    #[serde(default = "default_tool_hold_ms")]
    pub tool_hold_ms: u64,

    /// Hold on the undo button clears the canvas
    #[serde(default = "default_clear_hold_ms")]
    pub clear_hold_ms: u64,

    /// Hold on the wheel button starts color tracking
    #[serde(default = "default_wheel_hold_ms")]
    pub wheel_hold_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tool_hold_ms: default_tool_hold_ms(),
            clear_hold_ms: default_clear_hold_ms(),
            wheel_hold_ms: default_wheel_hold_ms(),
        }
    }
}

/// Polar color picker settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColorWheelConfig {
    /// Deflection radius of the neutral (anchor color) zone
    #[serde(default = "default_center_radius")]
    pub center_radius: f32,

    /// Deflection mapped to full brightness/saturation
    #[serde(default = "default_full_scale")]
    pub full_scale: f32,

    /// Floor for the brightness/saturation factor (0.0 - 1.0)
    #[serde(default = "default_min_factor")]
    pub min_factor: f32,

    /// Palette mode at startup
    #[serde(default)]
    pub default_palette: PaletteMode,

    /// Brush color at startup
    #[serde(default = "default_brush_color")]
    pub default_color: ColorSpec,
}

impl Default for ColorWheelConfig {
    fn default() -> Self {
        Self {
            center_radius: default_center_radius(),
            full_scale: default_full_scale(),
            min_factor: default_min_factor(),
            default_palette: PaletteMode::default(),
            default_color: default_brush_color(),
        }
    }
}

/// Brush and eraser size tables.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolConfig {
    /// Brush radii cycled by tapping the tool button
    #[serde(default = "default_brush_sizes")]
    pub brush_sizes: [i32; 3],

    /// Eraser radii cycled by tapping the tool button in eraser mode
    #[serde(default = "default_eraser_sizes")]
    pub eraser_sizes: [i32; 3],
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            brush_sizes: default_brush_sizes(),
            eraser_sizes: default_eraser_sizes(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum snapshots kept; each costs width * height * 2 bytes
    #[serde(default = "default_max_undos")]
    pub max_undos: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undos: default_max_undos(),
        }
    }
}

/// Main loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuntimeConfig {
    /// Idle delay after every tick in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> usize {
    480
}

fn default_height() -> usize {
    320
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_rotation() -> Rotation {
    Rotation::Landscape
}

fn default_deadzone() -> i32 {
    120
}

fn default_divisor() -> f32 {
    200.0
}

fn default_max_speed() -> f32 {
    10.0
}

fn default_cursor_margin() -> i32 {
    18
}

fn default_samples() -> u32 {
    50
}

fn default_sample_delay_ms() -> u32 {
    5
}

fn default_tool_hold_ms() -> u64 {
    500
}

fn default_clear_hold_ms() -> u64 {
    800
}

fn default_wheel_hold_ms() -> u64 {
    300
}

fn default_center_radius() -> f32 {
    300.0
}

fn default_full_scale() -> f32 {
    1500.0
}

fn default_min_factor() -> f32 {
    0.25
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_sizes() -> [i32; 3] {
    [2, 5, 10]
}

fn default_eraser_sizes() -> [i32; 3] {
    [5, 10, 16]
}

fn default_max_undos() -> usize {
    20
}

fn default_tick_ms() -> u32 {
    10
}
