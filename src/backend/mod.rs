//! Board backends.
//!
//! Only the in-memory simulator ships with the crate; firmware builds provide
//! their own implementations of the [`crate::hal`] traits.

pub mod script;
pub mod sim;

pub use script::{Script, ScriptStep};
pub use sim::{SimClock, SimDisplay, SimInput};
