//! Narrow interfaces to the hardware collaborators.
//!
//! The controller core only talks to the outside world through these traits:
//! - [`Display`]: panel bring-up and pixel transfer
//! - [`InputDevice`]: analog stick and button sampling
//! - [`BufferPool`]: large buffers for undo snapshots
//! - [`Clock`]: monotonic milliseconds and the idle delay
//!
//! [`crate::backend::sim`] provides in-memory implementations of all four.

use crate::error::HalError;
use crate::input::{Axis, Button};

/// Panel driver as seen by the controller.
///
/// Colors are raw RGB565 values. Drawing calls are fire-and-forget, matching
/// how SPI panel drivers behave once initialized.
pub trait Display {
    /// Brings up the bus and panel.
    fn init(&mut self) -> Result<(), HalError>;

    /// Sets the panel rotation in quarter turns (0-3).
    fn set_rotation(&mut self, quarter_turns: u8);

    /// Fills the whole surface.
    fn fill_screen(&mut self, color: u16);

    /// Fills a disc centered at `(x, y)`.
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: u16);

    /// Draws a horizontal segment starting at `(x, y)`.
    fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: u16);

    /// Draws a vertical segment starting at `(x, y)`.
    fn draw_vline(&mut self, x: i32, y: i32, height: i32, color: u16);

    /// Transfers a `width x height` row-major block to offset `(x, y)`.
    fn push_region(&mut self, x: i32, y: i32, width: i32, height: i32, pixels: &[u16]);
}

/// Analog/digital input peripheral.
pub trait InputDevice {
    /// Configures ADC channels and button pull-ups.
    fn init(&mut self) -> Result<(), HalError>;

    /// Synchronous ADC read (12-bit on the reference board).
    fn read_axis(&mut self, axis: Axis) -> Result<u16, HalError>;

    /// Returns whether the button is held. Implementations translate the
    /// active-low GPIO level (0 = pressed) before returning.
    fn is_pressed(&mut self, button: Button) -> Result<bool, HalError>;
}

/// Source of large contiguous buffers with a nullable-failure contract.
pub trait BufferPool {
    /// Returns a zeroed buffer of `len` pixels, or `None` when memory is short.
    fn allocate(&mut self, len: usize) -> Option<Vec<u16>>;
}

/// Monotonic time source plus the cooperative idle delay.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never goes backwards.
    fn now_ms(&self) -> u64;

    /// Yields to the host scheduler for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Heap-backed pool that reports allocation failure instead of aborting.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapPool;

impl BufferPool for HeapPool {
    fn allocate(&mut self, len: usize) -> Option<Vec<u16>> {
        let mut buf = Vec::new();
        if let Err(err) = buf.try_reserve_exact(len) {
            log::warn!("Snapshot allocation of {len} pixels failed: {err}");
            return None;
        }
        buf.resize(len, 0);
        Some(buf)
    }
}

/// Pool that hands out a fixed number of buffers and then fails.
///
/// The budget counts allocations, not live buffers: dropping a buffer does
/// not give its slot back. Models an external memory bank that runs dry; mostly useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct LimitedPool {
    remaining: usize,
}

impl LimitedPool {
    pub fn new(allocations: usize) -> Self {
        Self {
            remaining: allocations,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl BufferPool for LimitedPool {
    fn allocate(&mut self, len: usize) -> Option<Vec<u16>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        HeapPool.allocate(len)
    }
}
