//! Brush/eraser selection and size cycling.

use crate::config::ToolConfig;

/// Active tool and size index.
///
/// Brush and eraser share one index into two parallel size tables, so
/// switching tools keeps the relative size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolState {
    brush_sizes: [i32; 3],
    eraser_sizes: [i32; 3],
    index: usize,
    eraser: bool,
}

impl ToolState {
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            brush_sizes: config.brush_sizes,
            eraser_sizes: config.eraser_sizes,
            index: 0,
            eraser: false,
        }
    }

    /// Advances the size index 0 -> 1 -> 2 -> 0.
    pub fn cycle_size(&mut self) {
        self.index = (self.index + 1) % self.brush_sizes.len();
        log::debug!("Size index {} -> radius {}", self.index, self.effective_size());
    }

    /// Switches between brush and eraser without touching the size index.
    pub fn toggle_eraser(&mut self) {
        self.eraser = !self.eraser;
        log::debug!("Eraser {}", if self.eraser { "on" } else { "off" });
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Radius of the active tool.
    pub fn effective_size(&self) -> i32 {
        if self.eraser {
            self.eraser_sizes[self.index]
        } else {
            self.brush_sizes[self.index]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_taps_return_to_start() {
        let mut tools = ToolState::new(&ToolConfig::default());
        let start = tools.index();
        let mut seen = Vec::new();
        for _ in 0..3 {
            tools.cycle_size();
            seen.push(tools.effective_size());
        }
        assert_eq!(tools.index(), start);
        assert_eq!(seen, vec![5, 10, 2]);
    }

    #[test]
    fn eraser_toggle_keeps_index() {
        let mut tools = ToolState::new(&ToolConfig::default());
        tools.cycle_size();
        tools.toggle_eraser();
        assert!(tools.is_eraser());
        assert_eq!(tools.index(), 1);
        assert_eq!(tools.effective_size(), 10);
        tools.toggle_eraser();
        assert_eq!(tools.effective_size(), 5);
    }
}
