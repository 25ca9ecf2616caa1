//! Canvas plus undo history, mutated only through stroke/clear/undo.

use super::history::{Snapshot, UndoStore};
use super::{Canvas, Color};
use crate::hal::BufferPool;
use crate::util::Rect;

/// Owns the canvas and its undo history.
///
/// Every destructive operation that starts a new user-visible step pushes one
/// snapshot first: one per stroke gesture, one per clear.
pub struct Drawing {
    canvas: Canvas,
    history: UndoStore,
    pool: Box<dyn BufferPool>,
    dropped_snapshots: usize,
}

impl Drawing {
    pub fn new(canvas: Canvas, max_undos: usize, pool: Box<dyn BufferPool>) -> Self {
        Self {
            canvas,
            history: UndoStore::new(max_undos),
            pool,
            dropped_snapshots: 0,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &UndoStore {
        &self.history
    }

    /// Number of undo points skipped because no buffer was available.
    pub fn dropped_snapshots(&self) -> usize {
        self.dropped_snapshots
    }

    /// Records an undo point for the current canvas.
    ///
    /// Allocation failure is not an error: the step simply has no undo point.
    /// Returns whether a snapshot was stored.
    fn checkpoint(&mut self) -> bool {
        match Snapshot::capture(&self.canvas, self.pool.as_mut()) {
            Some(snapshot) => {
                if self.history.push(snapshot).is_some() {
                    log::debug!(
                        "Undo history full ({}), released oldest snapshot",
                        self.history.capacity()
                    );
                }
                true
            }
            None => {
                self.dropped_snapshots += 1;
                log::warn!("Out of memory for undo snapshot; continuing without undo point");
                false
            }
        }
    }

    /// Called on the tick a stroke gesture starts, before its first dab.
    pub fn begin_stroke(&mut self) -> bool {
        self.checkpoint()
    }

    /// Paints one dab of the current stroke. Returns the damaged rectangle.
    pub fn stroke(&mut self, x: i32, y: i32, radius: i32, color: Color) -> Option<Rect> {
        self.canvas.fill_disc(x, y, radius, color)
    }

    /// Snapshots, then wipes the canvas to its background.
    pub fn clear(&mut self) -> bool {
        let saved = self.checkpoint();
        self.canvas.clear();
        log::info!("Canvas cleared");
        saved
    }

    /// Restores the most recent snapshot.
    ///
    /// Returns `true` when the canvas changed and needs a full repaint; an empty
    /// history is a no-op.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            log::debug!("Undo requested with empty history");
            return false;
        };
        let restored = self.canvas.restore_from(snapshot.pixels());
        log::debug!("Undo restored snapshot, {} left", self.history.len());
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED, WHITE};
    use crate::hal::{HeapPool, LimitedPool};

    fn drawing(max_undos: usize) -> Drawing {
        Drawing::new(Canvas::new(40, 20, WHITE), max_undos, Box::new(HeapPool))
    }

    #[test]
    fn stroke_gesture_is_one_undo_step() {
        let mut drawing = drawing(5);
        assert!(drawing.begin_stroke());
        for x in 5..15 {
            drawing.stroke(x, 10, 2, RED);
        }
        assert_eq!(drawing.history().len(), 1);

        assert!(drawing.undo());
        assert_eq!(drawing.canvas(), &Canvas::new(40, 20, WHITE));
    }

    #[test]
    fn undo_on_empty_history_changes_nothing() {
        let mut drawing = drawing(5);
        drawing.stroke(3, 3, 1, BLACK);
        let before = drawing.canvas().clone();
        assert!(!drawing.undo());
        assert_eq!(drawing.canvas(), &before);
        assert!(drawing.history().is_empty());
    }

    #[test]
    fn clear_is_undoable() {
        let mut drawing = drawing(5);
        drawing.begin_stroke();
        drawing.stroke(10, 10, 4, BLACK);
        let painted = drawing.canvas().clone();

        assert!(drawing.clear());
        assert_eq!(drawing.canvas().pixel(10, 10), Some(WHITE));
        assert!(drawing.undo());
        assert_eq!(drawing.canvas(), &painted);
    }

    #[test]
    fn allocation_failure_keeps_drawing() {
        let mut drawing = Drawing::new(Canvas::new(10, 10, WHITE), 5, Box::new(LimitedPool::new(0)));
        assert!(!drawing.begin_stroke());
        drawing.stroke(5, 5, 1, RED);
        assert_eq!(drawing.canvas().pixel(5, 5), Some(RED));
        assert!(drawing.history().is_empty());
        assert_eq!(drawing.dropped_snapshots(), 1);
    }
}
