//! Controller context: every piece of mutable paint state in one owned value.

use crate::config::Config;
use crate::draw::{
    Canvas, Color, ColorWheel, CursorCompositor, CursorStyle, DirtyTracker, Drawing, GRAY,
    PaletteMode,
};
use crate::error::{Error, Result};
use crate::hal::{BufferPool, Clock, Display, InputDevice};
use crate::input::{
    Calibration, CursorPosition, GestureClassifier, GestureEvent, MotionIntegrator, ToolState,
    WheelState,
};

/// Running totals, reported by the CLI at the end of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub strokes: u64,
    pub dabs: u64,
    pub undos: u64,
    pub clears: u64,
    pub colors_picked: u64,
}

/// What one tick did; mostly useful to tests and logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Gestures classified this tick, in order
    pub events: Vec<GestureEvent>,
    /// Cursor pixel changed
    pub moved: bool,
    /// A dab was painted
    pub drew: bool,
    /// The whole canvas was re-sent to the panel
    pub full_repaint: bool,
    /// The cursor overlay was recomposed
    pub cursor_redrawn: bool,
}

/// The paint controller.
///
/// Owns the canvas, undo history, calibration, tool/color state and the
/// button state machines; peripherals are borrowed per call.
pub struct Controller {
    pub(super) drawing: Drawing,
    pub(super) calibration: Calibration,
    pub(super) motion: MotionIntegrator,
    pub(super) wheel: ColorWheel,
    pub(super) classifier: GestureClassifier,
    pub(super) tools: ToolState,
    pub(super) position: CursorPosition,
    /// Last integer position the cursor was committed at
    pub(super) committed: (i32, i32),
    pub(super) color: Color,
    pub(super) palette: PaletteMode,
    pub(super) stroke_active: bool,
    pub(super) dirty: DirtyTracker,
    pub(super) compositor: CursorCompositor,
    /// Cursor decoration changed without the cursor moving
    pub(super) cursor_stale: bool,
    pub(super) preview_visible: bool,
    /// Color the preview swatch was last drawn with
    pub(super) preview_color: Option<Color>,
    pub(super) stats: SessionStats,
}

impl Controller {
    /// Builds a controller around an already measured calibration.
    ///
    /// Does not touch any peripheral; [`Controller::start`] is the full
    /// bring-up sequence.
    pub fn with_calibration(
        config: &Config,
        pool: Box<dyn BufferPool>,
        calibration: Calibration,
    ) -> Result<Self> {
        let width = config.canvas.width;
        let height = config.canvas.height;
        let margin = config.motion.cursor_margin.max(1);
        let overlay = 2 * margin as usize;
        if width <= overlay || height <= overlay {
            return Err(Error::CanvasTooSmall {
                width,
                height,
                overlay,
            });
        }

        let canvas = Canvas::new(width, height, config.canvas.background.to_color());
        let motion = MotionIntegrator::new(&config.motion, width, height);
        let position = motion.home();

        Ok(Self {
            drawing: Drawing::new(canvas, config.history.max_undos, pool),
            calibration,
            motion,
            wheel: ColorWheel::new(&config.color_wheel),
            classifier: GestureClassifier::new(&config.gestures),
            tools: ToolState::new(&config.tools),
            committed: position.pixel(),
            position,
            color: config.color_wheel.default_color.to_color(),
            palette: config.color_wheel.default_palette,
            stroke_active: false,
            dirty: DirtyTracker::new(),
            compositor: CursorCompositor::new(margin),
            cursor_stale: true,
            preview_visible: false,
            preview_color: None,
            stats: SessionStats::default(),
        })
    }

    /// Brings up the panel and inputs, calibrates, and draws the first cursor.
    ///
    /// # Errors
    /// - [`Error::DisplayInit`] if the panel does not come up
    /// - [`Error::Peripheral`] if the input peripheral fails to init or read
    pub fn start<D, I, C>(
        config: &Config,
        pool: Box<dyn BufferPool>,
        display: &mut D,
        input: &mut I,
        clock: &mut C,
    ) -> Result<Self>
    where
        D: Display + ?Sized,
        I: InputDevice + ?Sized,
        C: Clock + ?Sized,
    {
        display.init().map_err(Error::DisplayInit)?;
        display.set_rotation(config.canvas.rotation.quarter_turns());
        let background = config.canvas.background.to_color();
        display.fill_screen(background.raw());
        log::info!(
            "Display ready: {}x{} canvas, rotation {:?}",
            config.canvas.width,
            config.canvas.height,
            config.canvas.rotation
        );

        input.init()?;
        let calibration = Calibration::measure(
            input,
            clock,
            config.calibration.samples,
            config.calibration.sample_delay_ms,
        )?;

        let mut controller = Self::with_calibration(config, pool, calibration)?;
        controller.redraw_cursor(display);
        Ok(controller)
    }

    pub fn canvas(&self) -> &Canvas {
        self.drawing.canvas()
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn position(&self) -> CursorPosition {
        self.position
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn palette(&self) -> PaletteMode {
        self.palette
    }

    pub fn wheel_state(&self) -> WheelState {
        self.classifier.wheel_state()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Moves the cursor directly, e.g. to restore a known position in tests.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = CursorPosition { x, y };
        self.motion.clamp(&mut self.position);
    }

    /// Color that a dab paints with the active tool.
    pub(super) fn paint_color(&self) -> Color {
        if self.tools.is_eraser() {
            self.drawing.canvas().background()
        } else {
            self.color
        }
    }

    pub(super) fn cursor_style(&self) -> CursorStyle {
        let accent = self.drawing.canvas().background().contrasting();
        CursorStyle {
            radius: self.tools.effective_size(),
            color: self.color,
            eraser: self.tools.is_eraser(),
            accent,
            eraser_ring: GRAY,
        }
    }
}
