//! Input handling and the paint state machine.
//!
//! This module turns raw stick samples and button levels into cursor motion,
//! tool/color changes and canvas edits. [`Controller`] owns all of that state
//! and is advanced one tick at a time.

pub mod calibration;
pub mod events;
pub mod gesture;
pub mod motion;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use calibration::Calibration;
pub use events::{Axis, Button};
pub use gesture::{ButtonLevels, ButtonState, Gesture, GestureClassifier, GestureEvent, WheelState};
pub use motion::{CursorPosition, MotionIntegrator};
pub use state::{Controller, SessionStats, TickReport};
pub use tool::ToolState;
