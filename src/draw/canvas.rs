//! Persistent pixel canvas.

use super::Color;
use crate::util::Rect;

/// The drawable surface: a contiguous row-major RGB565 buffer.
///
/// This is the single source of truth for what has been painted. The cursor
/// overlay and the color-wheel preview never write here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<u16>,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background.raw(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color used by `clear` and by the eraser.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Raw pixel slice, row-major.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Number of pixels in the buffer.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| Color(self.pixels[idx]))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    /// Fills a disc of `radius` around `(cx, cy)`, clipped to the canvas.
    ///
    /// Returns the clipped damage rectangle, or `None` if the disc missed the
    /// canvas entirely.
    pub fn fill_disc(&mut self, cx: i32, cy: i32, radius: i32, color: Color) -> Option<Rect> {
        let damage = Rect::around_disc(cx, cy, radius)?
            .clamp_to_bounds(self.width as i32, self.height as i32)?;
        let r = radius.max(0) as i64;
        let r_sq = r * r;

        for y in damage.y..damage.y + damage.height {
            let dy = (y - cy) as i64;
            let row = y as usize * self.width;
            for x in damage.x..damage.x + damage.width {
                let dx = (x - cx) as i64;
                if dx * dx + dy * dy <= r_sq {
                    self.pixels[row + x as usize] = color.raw();
                }
            }
        }

        Some(damage)
    }

    /// Fills the whole canvas with the background color.
    pub fn clear(&mut self) {
        self.pixels.fill(self.background.raw());
    }

    /// Copies `region` (must lie inside the canvas) into `dst`, row-major.
    ///
    /// `dst` must hold at least `region.area()` pixels. Returns the number of
    /// pixels written, zero if the region does not fit.
    pub fn copy_region(&self, region: Rect, dst: &mut [u16]) -> usize {
        let Some(clamped) = region.clamp_to_bounds(self.width as i32, self.height as i32) else {
            return 0;
        };
        if clamped != region || dst.len() < region.area() {
            return 0;
        }

        let w = region.width as usize;
        for (row, chunk) in dst.chunks_exact_mut(w).take(region.height as usize).enumerate() {
            let start = (region.y as usize + row) * self.width + region.x as usize;
            chunk.copy_from_slice(&self.pixels[start..start + w]);
        }
        region.area()
    }

    /// Overwrites every pixel from `src`. Lengths must match.
    pub(crate) fn restore_from(&mut self, src: &[u16]) -> bool {
        if src.len() != self.pixels.len() {
            return false;
        }
        self.pixels.copy_from_slice(src);
        true
    }
}
