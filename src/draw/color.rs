//! Packed RGB565 color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// A 16-bit panel color packed as `RRRRRGGGGGGBBBBB`.
///
/// This is the native pixel format of the canvas and of every region pushed
/// to the display.
///
/// # Examples
///
/// ```
/// use stickpaint::draw::Color;
/// let red = Color::from_rgb8(255, 0, 0);
/// assert_eq!(red, stickpaint::draw::RED);
/// assert_eq!(red.raw(), 0xF800);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub u16);

impl Color {
    /// Packs 8-bit components by truncating the low bits of each channel.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }

    /// Expands back to 8-bit components, replicating high bits into the low ones.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let r5 = ((self.0 >> 11) & 0x1F) as u8;
        let g6 = ((self.0 >> 5) & 0x3F) as u8;
        let b5 = (self.0 & 0x1F) as u8;
        (
            (r5 << 3) | (r5 >> 2),
            (g6 << 2) | (g6 >> 4),
            (b5 << 3) | (b5 >> 2),
        )
    }

    /// Raw packed value as written to the panel.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Picks black or white, whichever reads better on top of this color.
    pub fn contrasting(self) -> Self {
        let (r, g, b) = self.to_rgb8();
        let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
        if luma > 128_000 { BLACK } else { WHITE }
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const BLACK: Color = Color(0x0000);
pub const WHITE: Color = Color(0xFFFF);
pub const RED: Color = Color(0xF800);
pub const GREEN: Color = Color(0x07E0);
pub const BLUE: Color = Color(0x001F);
pub const YELLOW: Color = Color(0xFFE0);
pub const ORANGE: Color = Color::from_rgb8(255, 128, 0);
pub const PINK: Color = Color(0xF81F);
/// Mid gray used for the eraser ring.
pub const GRAY: Color = Color::from_rgb8(128, 128, 128);

/// Maps color name strings to colors (case-insensitive).
///
/// Used by the configuration system to parse named colors.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "gray" | "grey" => Some(GRAY),
        _ => None,
    }
}
