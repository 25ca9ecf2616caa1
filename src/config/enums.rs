//! Configuration enum types.

use crate::draw::{Color, color::BLACK, color::name_to_color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// background = "white"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, gray
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a packed panel [`Color`].
    ///
    /// Unknown color names fall back to black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

/// Panel orientation in quarter turns, as passed to the display driver.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Rotation {
    /// Native panel orientation (portrait on the reference panel)
    Portrait,
    /// One quarter turn (landscape)
    Landscape,
    /// Two quarter turns
    PortraitFlipped,
    /// Three quarter turns
    LandscapeFlipped,
}

impl Rotation {
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Portrait => 0,
            Rotation::Landscape => 1,
            Rotation::PortraitFlipped => 2,
            Rotation::LandscapeFlipped => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{ORANGE, WHITE};

    #[test]
    fn named_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Name("White".into()).to_color(), WHITE);
        assert_eq!(ColorSpec::Rgb([255, 128, 0]).to_color(), ORANGE);
        assert_eq!(ColorSpec::Name("mauve-ish".into()).to_color(), BLACK);
    }

    #[test]
    fn rotation_maps_to_quarter_turns() {
        assert_eq!(Rotation::Portrait.quarter_turns(), 0);
        assert_eq!(Rotation::Landscape.quarter_turns(), 1);
        assert_eq!(Rotation::LandscapeFlipped.quarter_turns(), 3);
    }
}
