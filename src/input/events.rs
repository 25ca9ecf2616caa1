//! Physical input identifiers shared by the classifier and the hardware traits.

use std::fmt;

/// Analog stick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Digital buttons on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Paints while held
    Draw,
    /// Tap cycles the brush size, hold toggles the eraser
    Tool,
    /// Tap undoes, hold clears the canvas
    Undo,
    /// Tap toggles the palette, hold opens the color wheel
    Wheel,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Draw, Button::Tool, Button::Undo, Button::Wheel];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("axis X"),
            Axis::Y => f.write_str("axis Y"),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Button::Draw => "draw button",
            Button::Tool => "tool button",
            Button::Undo => "undo button",
            Button::Wheel => "color wheel button",
        };
        f.write_str(name)
    }
}
