//! Pixel canvas, undo history and panel compositing.
//!
//! This module defines the drawing side of the controller:
//! - [`Color`]: packed RGB565 color with predefined constants
//! - [`Canvas`] and [`Drawing`]: the persistent pixels plus bounded undo
//! - [`CursorCompositor`]: damage-based cursor overlay
//! - [`ColorWheel`]: polar color picker
//! - [`DirtyTracker`]: canvas regions pending a panel update

pub mod canvas;
pub mod color;
pub mod cursor;
pub mod dirty;
pub mod drawing;
pub mod history;
pub mod wheel;

// Re-export commonly used types at module level
pub use canvas::Canvas;
pub use color::Color;
pub use cursor::{CursorCompositor, CursorStyle};
pub use dirty::DirtyTracker;
pub use drawing::Drawing;
pub use history::{Snapshot, UndoStore};
pub use wheel::{ColorWheel, PaletteMode, hsv_to_color};

pub use color::{BLACK, BLUE, GRAY, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
