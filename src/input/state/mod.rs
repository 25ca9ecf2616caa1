mod actions;
mod core;
mod render;

pub use core::{Controller, SessionStats, TickReport};

use crate::error::Result;
use crate::hal::{Clock, Display, InputDevice};
use crate::input::{Axis, Button, ButtonLevels};

impl Controller {
    /// Runs one iteration of the paint loop.
    ///
    /// Reads the inputs, classifies gestures, integrates motion, applies the
    /// draw action and updates the panel. Motion and drawing are skipped
    /// while the color wheel owns the tick.
    ///
    /// # Errors
    /// Any peripheral read failure is returned immediately and is fatal.
    pub fn tick<D, I, C>(&mut self, display: &mut D, input: &mut I, clock: &C) -> Result<TickReport>
    where
        D: Display + ?Sized,
        I: InputDevice + ?Sized,
        C: Clock + ?Sized,
    {
        let now = clock.now_ms();
        let levels = ButtonLevels {
            draw: input.is_pressed(Button::Draw)?,
            tool: input.is_pressed(Button::Tool)?,
            undo: input.is_pressed(Button::Undo)?,
            wheel: input.is_pressed(Button::Wheel)?,
        };
        let raw_x = input.read_axis(Axis::X)?;
        let raw_y = input.read_axis(Axis::Y)?;

        let mut report = TickReport {
            events: self.classifier.classify(levels, now),
            ..TickReport::default()
        };
        for event in report.events.clone() {
            self.apply_event(event, raw_x, raw_y, &mut report);
        }

        if self.classifier.is_modal() {
            // a stroke never continues across the wheel
            self.stroke_active = false;
        } else {
            self.motion
                .integrate(&mut self.position, &self.calibration, raw_x, raw_y);
            let pixel = self.position.pixel();
            report.moved = pixel != self.committed;
            self.apply_draw(levels.draw, report.moved, &mut report);
        }

        self.render(display, &mut report);
        self.stats.ticks += 1;
        Ok(report)
    }
}
