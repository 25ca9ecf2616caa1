use crate::input::GestureEvent;

use super::{Controller, TickReport};

impl Controller {
    /// Applies one classified gesture.
    ///
    /// # Behavior
    /// - Tool tap/hold: cycle size / toggle eraser
    /// - Undo tap: restore the newest snapshot (full repaint)
    /// - Undo hold: snapshot, then clear (full repaint)
    /// - Wheel tap: toggle palette mode
    /// - Wheel tracking: recompute the color from the current deflection
    pub(super) fn apply_event(
        &mut self,
        event: GestureEvent,
        raw_x: u16,
        raw_y: u16,
        report: &mut TickReport,
    ) {
        match event {
            GestureEvent::CycleSize => {
                self.tools.cycle_size();
                self.cursor_stale = true;
            }
            GestureEvent::ToggleEraser => {
                self.tools.toggle_eraser();
                self.cursor_stale = true;
            }
            GestureEvent::Undo => {
                if self.drawing.undo() {
                    self.stats.undos += 1;
                    self.stroke_active = false;
                    self.dirty.mark_full();
                    report.full_repaint = true;
                }
            }
            GestureEvent::Clear => {
                self.drawing.clear();
                self.stats.clears += 1;
                self.stroke_active = false;
                self.dirty.mark_full();
                report.full_repaint = true;
            }
            GestureEvent::TogglePalette => {
                self.palette = self.palette.toggled();
                log::info!("Palette mode {:?}", self.palette);
            }
            GestureEvent::WheelOpened => {
                log::debug!("Color wheel tracking ({:?} palette)", self.palette);
                self.preview_visible = true;
            }
            GestureEvent::WheelTrack => {
                let (dx, dy) = self.calibration.deflection(raw_x, raw_y);
                let picked = self.wheel.color_at(dx, dy, self.palette);
                if picked != self.color {
                    self.color = picked;
                    self.cursor_stale = true;
                }
            }
            GestureEvent::WheelClosed => {
                self.stats.colors_picked += 1;
                self.hide_preview();
                self.cursor_stale = true;
                log::info!("Picked color {:#06x}", self.color.raw());
            }
        }
    }

    /// Decides whether this tick paints.
    ///
    /// The first tick of a press records an undo point before its dab; later
    /// ticks only paint when the cursor moved.
    pub(super) fn apply_draw(&mut self, draw_pressed: bool, moved: bool, report: &mut TickReport) {
        if !draw_pressed {
            self.stroke_active = false;
            return;
        }

        let starting = !self.stroke_active;
        if starting {
            self.drawing.begin_stroke();
            self.stroke_active = true;
            self.stats.strokes += 1;
        }
        if !(starting || moved) {
            return;
        }

        let (x, y) = self.position.pixel();
        let damage = self
            .drawing
            .stroke(x, y, self.tools.effective_size(), self.paint_color());
        self.dirty.mark_optional_rect(damage);
        self.stats.dabs += 1;
        report.drew = true;
    }
}
