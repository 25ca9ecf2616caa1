//! Cursor overlay compositing using the damage technique.
//!
//! The cursor is never painted into the canvas. Instead a small square of the
//! canvas under the cursor is copied into a scratch overlay, decorated there,
//! and pushed to the panel. Moving the cursor pushes the untouched canvas
//! square at the old position first, which erases the previous overlay.

use super::{Canvas, Color};
use crate::hal::Display;
use crate::util::Rect;

/// Swatch marker edge length in pixels.
const SWATCH: i32 = 4;

/// What the overlay should show for the current tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorStyle {
    /// Brush or eraser radius shown as a ring
    pub radius: i32,
    /// Current paint color, shown in the corner swatches
    pub color: Color,
    /// Eraser hides the swatches and draws a neutral ring
    pub eraser: bool,
    /// Crosshair and eraser ring color
    pub accent: Color,
    /// Eraser ring color
    pub eraser_ring: Color,
}

/// Scratch overlay plus the last committed cursor position.
#[derive(Debug)]
pub struct CursorCompositor {
    margin: i32,
    overlay: Vec<u16>,
    last: Option<(i32, i32)>,
}

impl CursorCompositor {
    /// Creates a compositor with a `2 * margin` square overlay.
    pub fn new(margin: i32) -> Self {
        let margin = margin.max(1);
        let size = (2 * margin) as usize;
        Self {
            margin,
            overlay: vec![0; size * size],
            last: None,
        }
    }

    /// Edge length of the overlay square.
    pub fn size(&self) -> i32 {
        2 * self.margin
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Position the overlay was last drawn at, if it is on screen.
    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.last
    }

    /// Overlay square for a cursor centered at `(x, y)`.
    pub fn region_at(&self, x: i32, y: i32) -> Option<Rect> {
        Rect::new(x - self.margin, y - self.margin, self.size(), self.size())
    }

    /// Forgets the on-screen overlay; used after a full repaint wiped it.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Pushes the plain canvas pixels under the previous position.
    ///
    /// Returns whether anything was restored.
    pub fn restore<D: Display + ?Sized>(&mut self, canvas: &Canvas, display: &mut D) -> bool {
        let Some((x, y)) = self.last.take() else {
            return false;
        };
        let Some(region) = self.region_at(x, y) else {
            return false;
        };
        if canvas.copy_region(region, &mut self.overlay) == 0 {
            log::warn!("Cursor region at ({x}, {y}) is outside the canvas");
            return false;
        }
        display.push_region(region.x, region.y, region.width, region.height, &self.overlay);
        true
    }

    /// Composes the cursor over the canvas at `(x, y)` and pushes it.
    pub fn draw<D: Display + ?Sized>(
        &mut self,
        canvas: &Canvas,
        display: &mut D,
        x: i32,
        y: i32,
        style: &CursorStyle,
    ) -> bool {
        let Some(region) = self.region_at(x, y) else {
            return false;
        };
        if canvas.copy_region(region, &mut self.overlay) == 0 {
            log::warn!("Cursor region at ({x}, {y}) is outside the canvas");
            return false;
        }

        self.decorate(style);
        display.push_region(region.x, region.y, region.width, region.height, &self.overlay);
        self.last = Some((x, y));
        true
    }

    /// Restores the old position and draws at the new one.
    pub fn refresh<D: Display + ?Sized>(
        &mut self,
        canvas: &Canvas,
        display: &mut D,
        x: i32,
        y: i32,
        style: &CursorStyle,
    ) -> bool {
        self.restore(canvas, display);
        self.draw(canvas, display, x, y, style)
    }

    fn decorate(&mut self, style: &CursorStyle) {
        let c = self.margin;
        let size = self.size();

        if !style.eraser {
            let corners = [
                (0, 0),
                (size - SWATCH, 0),
                (0, size - SWATCH),
                (size - SWATCH, size - SWATCH),
            ];
            for (sx, sy) in corners {
                for dy in 0..SWATCH {
                    for dx in 0..SWATCH {
                        self.put(sx + dx, sy + dy, style.color);
                    }
                }
            }
        }

        let ring = if style.eraser {
            style.eraser_ring
        } else {
            style.color
        };
        self.circle(c, c, style.radius, ring);

        let arm = (self.margin / 3).max(2);
        for d in -arm..=arm {
            self.put(c + d, c, style.accent);
            self.put(c, c + d, style.accent);
        }
    }

    /// Midpoint circle outline, clipped to the overlay.
    fn circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius <= 0 {
            self.put(cx, cy, color);
            return;
        }
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.put(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        let size = self.size();
        if x < 0 || y < 0 || x >= size || y >= size {
            return;
        }
        self.overlay[(y * size + x) as usize] = color.raw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::sim::SimDisplay;
    use crate::draw::{BLACK, GRAY, RED, WHITE};

    fn style(eraser: bool) -> CursorStyle {
        CursorStyle {
            radius: 5,
            color: RED,
            eraser,
            accent: BLACK,
            eraser_ring: GRAY,
        }
    }

    fn setup() -> (Canvas, SimDisplay, CursorCompositor) {
        let canvas = Canvas::new(64, 48, WHITE);
        let mut display = SimDisplay::new(64, 48);
        display.fill_screen(WHITE.raw());
        (canvas, display, CursorCompositor::new(8))
    }

    #[test]
    fn drawing_never_touches_canvas() {
        let (canvas, mut display, mut compositor) = setup();
        let before = canvas.clone();
        assert!(compositor.draw(&canvas, &mut display, 20, 20, &style(false)));
        assert_eq!(canvas, before);
        assert_eq!(display.pixel(20, 20), Some(BLACK.raw()));
        assert_eq!(compositor.last_position(), Some((20, 20)));
    }

    #[test]
    fn swatches_only_for_brush() {
        let (canvas, mut display, mut compositor) = setup();
        compositor.draw(&canvas, &mut display, 20, 20, &style(false));
        // top-left corner of the 16px overlay starts at (12, 12)
        assert_eq!(display.pixel(12, 12), Some(RED.raw()));

        let (canvas, mut display, mut compositor) = setup();
        compositor.draw(&canvas, &mut display, 20, 20, &style(true));
        assert_eq!(display.pixel(12, 12), Some(WHITE.raw()));
        assert_eq!(display.pixel(25, 20), Some(GRAY.raw()));
    }

    #[test]
    fn moving_restores_previous_region_exactly() {
        let (canvas, mut display, mut compositor) = setup();
        compositor.draw(&canvas, &mut display, 20, 20, &style(false));
        compositor.refresh(&canvas, &mut display, 40, 30, &style(false));

        let old = compositor.region_at(20, 20).unwrap();
        let new = compositor.region_at(40, 30).unwrap();
        for y in old.y..old.y + old.height {
            for x in old.x..old.x + old.width {
                let inside_new =
                    x >= new.x && x < new.x + new.width && y >= new.y && y < new.y + new.height;
                if !inside_new {
                    assert_eq!(display.pixel(x, y), canvas.pixel(x, y).map(|c| c.raw()));
                }
            }
        }
    }

    #[test]
    fn only_overlay_sized_regions_are_pushed() {
        let (canvas, mut display, mut compositor) = setup();
        display.reset_stats();
        compositor.draw(&canvas, &mut display, 20, 20, &style(false));
        compositor.refresh(&canvas, &mut display, 21, 20, &style(false));
        assert_eq!(display.stats().regions_pushed, 3);
        assert_eq!(display.stats().pixels_pushed, 3 * 16 * 16);
    }

    #[test]
    fn restore_without_previous_draw_is_noop() {
        let (canvas, mut display, mut compositor) = setup();
        assert!(!compositor.restore(&canvas, &mut display));
        compositor.draw(&canvas, &mut display, 20, 20, &style(false));
        compositor.invalidate();
        assert!(!compositor.restore(&canvas, &mut display));
    }
}
