//! Bounded undo history of full-canvas snapshots.

use super::Canvas;
use crate::hal::BufferPool;
use std::collections::VecDeque;

/// An owned copy of every canvas pixel at one point in time.
///
/// The buffer is released when the snapshot is dropped, whether that happens
/// on eviction or after an undo consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pixels: Vec<u16>,
}

impl Snapshot {
    /// Copies the canvas into a buffer obtained from `pool`.
    ///
    /// Returns `None` if the pool could not provide a buffer.
    pub fn capture(canvas: &Canvas, pool: &mut dyn BufferPool) -> Option<Self> {
        let mut pixels = pool.allocate(canvas.len())?;
        if pixels.len() != canvas.len() {
            log::warn!(
                "Pool returned {} pixels, expected {}; dropping snapshot",
                pixels.len(),
                canvas.len()
            );
            return None;
        }
        pixels.copy_from_slice(canvas.pixels());
        Some(Self { pixels })
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }
}

/// FIFO-bounded stack of snapshots, oldest at the front.
#[derive(Debug)]
pub struct UndoStore {
    slots: VecDeque<Snapshot>,
    capacity: usize,
}

impl UndoStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores `snapshot` as the newest entry.
    ///
    /// When the store is full the oldest snapshot is evicted first and handed
    /// back so the caller can observe its release.
    pub fn push(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        if self.capacity == 0 {
            return Some(snapshot);
        }
        let evicted = if self.slots.len() >= self.capacity {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(snapshot);
        evicted
    }

    /// Removes and returns the newest snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.slots.pop_back()
    }

    /// Iterates from the newest snapshot to the oldest.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Snapshot> {
        self.slots.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, WHITE};
    use crate::hal::{HeapPool, LimitedPool};

    fn marked_canvas(mark: i32) -> Canvas {
        let mut canvas = Canvas::new(32, 4, WHITE);
        canvas.fill_disc(mark, 1, 0, BLACK);
        canvas
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let mut store = UndoStore::new(3);
        for i in 0..10 {
            let snap = Snapshot::capture(&marked_canvas(i), &mut HeapPool).unwrap();
            store.push(snap);
            assert!(store.len() <= 3);
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn overflow_evicts_exactly_the_oldest() {
        let mut store = UndoStore::new(2);
        let first = Snapshot::capture(&marked_canvas(0), &mut HeapPool).unwrap();
        let expected = first.clone();
        assert!(store.push(first).is_none());
        assert!(
            store
                .push(Snapshot::capture(&marked_canvas(1), &mut HeapPool).unwrap())
                .is_none()
        );

        let evicted = store
            .push(Snapshot::capture(&marked_canvas(2), &mut HeapPool).unwrap())
            .expect("oldest snapshot evicted");
        assert_eq!(evicted, expected);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn pop_returns_newest_first() {
        let mut store = UndoStore::new(5);
        for i in 0..3 {
            store.push(Snapshot::capture(&marked_canvas(i), &mut HeapPool).unwrap());
        }
        let newest = store.pop().unwrap();
        assert_eq!(newest.pixels(), marked_canvas(2).pixels());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_allocation_yields_no_snapshot() {
        let mut pool = LimitedPool::new(0);
        assert!(Snapshot::capture(&marked_canvas(0), &mut pool).is_none());
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut store = UndoStore::new(0);
        let snap = Snapshot::capture(&marked_canvas(0), &mut HeapPool).unwrap();
        assert!(store.push(snap).is_some());
        assert!(store.is_empty());
    }
}
