//! Polar color wheel: maps stick deflection to a panel color.
//!
//! The deflection angle selects the hue and the deflection distance selects
//! either brightness (dark palette) or saturation (light palette). A small
//! neutral zone around the rest position yields the palette's anchor color.

use super::color::{BLACK, Color, WHITE};
use crate::config::ColorWheelConfig;
use crate::util::normalize_degrees;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which way the wheel interprets distance from the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    /// Black at the center, distance raises brightness at full saturation.
    #[default]
    Dark,
    /// White at the center, distance raises saturation at full brightness.
    Light,
}

impl PaletteMode {
    /// Color returned inside the neutral zone.
    pub fn anchor(self) -> Color {
        match self {
            Self::Dark => BLACK,
            Self::Light => WHITE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Fixed wheel geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorWheel {
    /// Deflection below this radius is the neutral zone
    pub center_radius: f32,
    /// Deflection that maps to a factor of 1.0
    pub full_scale: f32,
    /// Lowest factor handed to the HSV conversion outside the neutral zone
    pub min_factor: f32,
}

impl ColorWheel {
    pub fn new(config: &ColorWheelConfig) -> Self {
        Self {
            center_radius: config.center_radius,
            full_scale: config.full_scale,
            min_factor: config.min_factor,
        }
    }

    /// Maps a raw deflection vector to a color.
    ///
    /// Pure: the same `(dx, dy, mode)` always produces the same color.
    pub fn color_at(&self, dx: f32, dy: f32, mode: PaletteMode) -> Color {
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < self.center_radius {
            return mode.anchor();
        }
        let hue = normalize_degrees(dy.atan2(dx).to_degrees());
        let factor = self.factor(distance);
        match mode {
            PaletteMode::Dark => hsv_to_color(hue, 1.0, factor),
            PaletteMode::Light => hsv_to_color(hue, factor, 1.0),
        }
    }

    /// Linear distance scale floored at `min_factor` and capped at 1.0.
    pub fn factor(&self, distance: f32) -> f32 {
        let scale = if self.full_scale > 0.0 {
            distance / self.full_scale
        } else {
            1.0
        };
        scale.clamp(self.min_factor.min(1.0), 1.0)
    }
}

/// Standard six-sector HSV to RGB conversion.
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `value` in `[0, 1]`.
pub fn hsv_to_color(hue: f32, saturation: f32, value: f32) -> Color {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let h = normalize_degrees(hue) / 60.0;
    let chroma = v * s;
    let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_byte = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::from_rgb8(to_byte(r), to_byte(g), to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, GREEN, RED};

    fn wheel() -> ColorWheel {
        ColorWheel {
            center_radius: 300.0,
            full_scale: 1500.0,
            min_factor: 0.25,
        }
    }

    #[test]
    fn zero_distance_yields_anchor_for_any_mode() {
        let wheel = wheel();
        assert_eq!(wheel.color_at(0.0, 0.0, PaletteMode::Dark), BLACK);
        assert_eq!(wheel.color_at(0.0, 0.0, PaletteMode::Light), WHITE);
        assert_eq!(wheel.color_at(-120.0, 90.0, PaletteMode::Dark), BLACK);
    }

    #[test]
    fn full_deflection_in_dark_mode_is_pure_hue() {
        let wheel = wheel();
        assert_eq!(wheel.color_at(2000.0, 0.0, PaletteMode::Dark), RED);
        let angle = 120f32.to_radians();
        let green = wheel.color_at(2000.0 * angle.cos(), 2000.0 * angle.sin(), PaletteMode::Dark);
        assert_eq!(green, GREEN);
        let angle = 240f32.to_radians();
        let blue = wheel.color_at(2000.0 * angle.cos(), 2000.0 * angle.sin(), PaletteMode::Dark);
        assert_eq!(blue, BLUE);
    }

    #[test]
    fn factor_is_floored_and_capped() {
        let wheel = wheel();
        assert_eq!(wheel.factor(2000.0), 1.0);
        assert_eq!(wheel.factor(301.0), 0.25);
        assert!((wheel.factor(750.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn light_mode_fades_towards_white() {
        let wheel = wheel();
        let pale = wheel.color_at(400.0, 0.0, PaletteMode::Light);
        let (r, g, b) = pale.to_rgb8();
        assert_eq!(r, 255);
        assert!(g > 150 && b > 150);
        assert_eq!(wheel.color_at(1500.0, 0.0, PaletteMode::Light), RED);
    }

    #[test]
    fn dark_mode_dims_near_center() {
        let wheel = wheel();
        let (r, g, b) = wheel.color_at(400.0, 0.0, PaletteMode::Dark).to_rgb8();
        assert!(r < 100);
        assert_eq!((g, b), (0, 0));
    }

    #[test]
    fn identical_inputs_are_deterministic() {
        let wheel = wheel();
        for (dx, dy) in [(513.0, -822.0), (-1400.0, 12.0), (0.5, 999.0)] {
            for mode in [PaletteMode::Dark, PaletteMode::Light] {
                assert_eq!(wheel.color_at(dx, dy, mode), wheel.color_at(dx, dy, mode));
            }
        }
    }

    #[test]
    fn palette_toggle_round_trips() {
        assert_eq!(PaletteMode::Dark.toggled(), PaletteMode::Light);
        assert_eq!(PaletteMode::Dark.toggled().toggled(), PaletteMode::Dark);
    }
}
