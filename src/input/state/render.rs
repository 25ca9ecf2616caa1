use crate::draw::Canvas;
use crate::hal::Display;
use crate::util::Rect;

use super::{Controller, TickReport};

/// Top-left corner of the color-wheel preview box.
const PREVIEW_ORIGIN: i32 = 4;
/// Edge length of the preview box.
const PREVIEW_SIZE: i32 = 32;

impl Controller {
    /// Brings the panel up to date after a tick's state changes.
    ///
    /// Order matters: canvas damage first, then the cursor overlay on top of
    /// it, then the wheel preview on top of everything.
    pub(super) fn render<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
        report: &mut TickReport,
    ) {
        let full = self.dirty.is_full();
        self.flush_damage(display);
        if full {
            // the repaint wiped the overlay; nothing left to restore
            self.compositor.invalidate();
            self.preview_color = None;
        }

        if report.moved || report.drew || full || self.cursor_stale {
            report.cursor_redrawn = self.redraw_cursor(display);
        }

        if self.preview_visible
            && (report.cursor_redrawn || self.preview_color != Some(self.color))
        {
            self.draw_preview(display);
        }
    }

    /// Restores the previous overlay square and composes the cursor at the
    /// current position.
    pub(super) fn redraw_cursor<D: Display + ?Sized>(&mut self, display: &mut D) -> bool {
        let (x, y) = self.position.pixel();
        let style = self.cursor_style();
        let drawn = self
            .compositor
            .refresh(self.drawing.canvas(), display, x, y, &style);
        self.committed = (x, y);
        self.cursor_stale = false;
        drawn
    }

    /// Sends every dirty canvas rectangle to the panel.
    fn flush_damage<D: Display + ?Sized>(&mut self, display: &mut D) {
        let canvas = self.drawing.canvas();
        let regions = self
            .dirty
            .take_regions(canvas.width() as i32, canvas.height() as i32);
        for region in regions {
            push_canvas_region(canvas, display, region);
        }
    }

    /// Draws the candidate color in a framed box on the panel only.
    fn draw_preview<D: Display + ?Sized>(&mut self, display: &mut D) {
        let background = self.drawing.canvas().background();
        let frame = background.contrasting().raw();
        let x = PREVIEW_ORIGIN;
        let y = PREVIEW_ORIGIN;
        let s = PREVIEW_SIZE;

        for row in 1..s - 1 {
            display.draw_hline(x + 1, y + row, s - 2, background.raw());
        }
        display.draw_hline(x, y, s, frame);
        display.draw_hline(x, y + s - 1, s, frame);
        display.draw_vline(x, y, s, frame);
        display.draw_vline(x + s - 1, y, s, frame);
        display.fill_circle(x + s / 2, y + s / 2, s / 2 - 4, self.color.raw());
        self.preview_color = Some(self.color);
    }

    /// Marks the preview box dirty so the next flush restores the canvas.
    pub(super) fn hide_preview(&mut self) {
        if self.preview_visible {
            self.dirty.mark_optional_rect(Rect::new(
                PREVIEW_ORIGIN,
                PREVIEW_ORIGIN,
                PREVIEW_SIZE,
                PREVIEW_SIZE,
            ));
        }
        self.preview_visible = false;
        self.preview_color = None;
    }
}

/// Pushes `region` of the canvas to the panel without copying.
///
/// Full-width regions are contiguous in memory and go out in one transfer;
/// anything narrower is sent row by row.
pub(crate) fn push_canvas_region<D: Display + ?Sized>(
    canvas: &Canvas,
    display: &mut D,
    region: Rect,
) {
    let width = canvas.width();
    let pixels = canvas.pixels();
    let x = region.x as usize;
    let w = region.width as usize;

    if x == 0 && w == width {
        let start = region.y as usize * width;
        let end = start + region.height as usize * width;
        display.push_region(
            region.x,
            region.y,
            region.width,
            region.height,
            &pixels[start..end],
        );
        return;
    }

    for row in region.y..region.y + region.height {
        let start = row as usize * width + x;
        display.push_region(region.x, row, region.width, 1, &pixels[start..start + w]);
    }
}
