//! The cooperative paint loop.

use crate::error::Result;
use crate::hal::{Clock, Display, InputDevice};
use crate::input::{Controller, SessionStats};

/// Drives a [`Controller`] against one set of peripherals.
///
/// One iteration is a controller tick followed by a fixed `tick_ms` yield;
/// there are no threads and no other waits.
pub struct Runtime<D, I, C> {
    controller: Controller,
    display: D,
    input: I,
    clock: C,
    tick_ms: u32,
}

impl<D, I, C> Runtime<D, I, C>
where
    D: Display,
    I: InputDevice,
    C: Clock,
{
    pub fn new(controller: Controller, display: D, input: I, clock: C, tick_ms: u32) -> Self {
        Self {
            controller,
            display,
            input,
            clock,
            tick_ms: tick_ms.max(1),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs until `max_ticks` ticks have completed, or forever when `None`.
    ///
    /// # Errors
    /// Stops at the first peripheral failure and returns it.
    pub fn run(&mut self, max_ticks: Option<u64>) -> Result<SessionStats> {
        log::info!(
            "Paint loop running every {} ms{}",
            self.tick_ms,
            max_ticks.map_or(String::new(), |n| format!(" for {n} ticks"))
        );

        let mut ticks = 0;
        while max_ticks.is_none_or(|max| ticks < max) {
            match self
                .controller
                .tick(&mut self.display, &mut self.input, &self.clock)
            {
                Ok(report) => {
                    if !report.events.is_empty() {
                        log::debug!("Tick {ticks}: {:?}", report.events);
                    }
                }
                Err(err) => {
                    log::error!("Controller halted after {ticks} ticks: {err}");
                    return Err(err);
                }
            }
            ticks += 1;
            self.clock.delay_ms(self.tick_ms);
        }

        Ok(self.controller.stats())
    }
}
