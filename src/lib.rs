//! Joystick paint controller core.
//!
//! A two-axis stick and four buttons drive a cursor over an RGB565 canvas on a
//! small SPI panel. The crate holds the control/render core; panel, ADC/GPIO,
//! allocator and clock are reached through the traits in [`hal`], and
//! [`backend::sim`] implements them in memory for host runs and tests.

pub mod backend;
pub mod config;
pub mod draw;
pub mod error;
pub mod hal;
pub mod input;
pub mod runtime;
pub mod util;

pub use config::Config;
pub use error::{Error, HalError};
pub use input::Controller;
pub use runtime::Runtime;
