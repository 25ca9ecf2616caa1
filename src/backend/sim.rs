//! In-memory simulator board: framebuffer panel, scripted stick, manual clock.

use super::script::{InputFrame, Script};
use crate::error::HalError;
use crate::hal::{Clock, Display, InputDevice};
use crate::input::{Axis, Button};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared simulated time, in milliseconds.
pub type SimTime = Rc<Cell<u64>>;

/// Clock that only advances when the controller yields.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for peripherals that need to know the current time.
    pub fn handle(&self) -> SimTime {
        Rc::clone(&self.now)
    }

    pub fn advance(&mut self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}

/// Counters of the traffic sent to the simulated panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayStats {
    pub regions_pushed: usize,
    pub pixels_pushed: usize,
    pub screen_fills: usize,
    pub circles: usize,
    pub lines: usize,
}

/// Framebuffer-backed panel.
#[derive(Debug, Clone)]
pub struct SimDisplay {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
    rotation: u8,
    initialized: bool,
    fail_init: bool,
    stats: DisplayStats,
}

impl SimDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            rotation: 0,
            initialized: false,
            fail_init: false,
            stats: DisplayStats::default(),
        }
    }

    /// A panel whose `init` always fails, like one with a loose ribbon cable.
    pub fn unresponsive(width: usize, height: usize) -> Self {
        Self {
            fail_init: true,
            ..Self::new(width, height)
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn stats(&self) -> DisplayStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = DisplayStats::default();
    }

    fn set(&mut self, x: i32, y: i32, color: u16) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color;
    }
}

impl Display for SimDisplay {
    fn init(&mut self) -> Result<(), HalError> {
        if self.fail_init {
            return Err(HalError::InitFailed("simulated panel"));
        }
        self.initialized = true;
        Ok(())
    }

    fn set_rotation(&mut self, quarter_turns: u8) {
        self.rotation = quarter_turns % 4;
    }

    fn fill_screen(&mut self, color: u16) {
        self.stats.screen_fills += 1;
        self.pixels.fill(color);
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: u16) {
        self.stats.circles += 1;
        let r = radius.max(0);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set(x + dx, y + dy, color);
                }
            }
        }
    }

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: u16) {
        self.stats.lines += 1;
        for dx in 0..width.max(0) {
            self.set(x + dx, y, color);
        }
    }

    fn draw_vline(&mut self, x: i32, y: i32, height: i32, color: u16) {
        self.stats.lines += 1;
        for dy in 0..height.max(0) {
            self.set(x, y + dy, color);
        }
    }

    fn push_region(&mut self, x: i32, y: i32, width: i32, height: i32, pixels: &[u16]) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.stats.regions_pushed += 1;
        self.stats.pixels_pushed += (width * height) as usize;
        for (row, line) in pixels
            .chunks_exact(width as usize)
            .take(height as usize)
            .enumerate()
        {
            for (col, &color) in line.iter().enumerate() {
                self.set(x + col as i32, y + row as i32, color);
            }
        }
    }
}

/// Stick and buttons driven by queued samples, a script, or direct setters.
///
/// Axis reads drain the queued samples first (used for calibration tests),
/// then follow the script if one is loaded, otherwise the manual frame.
#[derive(Debug)]
pub struct SimInput {
    time: SimTime,
    queued_x: VecDeque<u16>,
    queued_y: VecDeque<u16>,
    script: Option<Script>,
    origin: Option<u64>,
    manual: InputFrame,
    failing: bool,
}

impl SimInput {
    /// Stick resting at `rest`, no buttons pressed.
    pub fn new(time: SimTime, rest: [u16; 2]) -> Self {
        Self {
            time,
            queued_x: VecDeque::new(),
            queued_y: VecDeque::new(),
            script: None,
            origin: None,
            manual: InputFrame::at_rest(rest),
            failing: false,
        }
    }

    /// Returns the given per-axis readings in order before falling back to rest.
    pub fn with_axis_samples(time: SimTime, xs: Vec<u16>, ys: Vec<u16>) -> Self {
        let rest = [
            xs.last().copied().unwrap_or(2048),
            ys.last().copied().unwrap_or(2048),
        ];
        Self {
            queued_x: xs.into(),
            queued_y: ys.into(),
            ..Self::new(time, rest)
        }
    }

    /// Replays `script`, holding the rest position until the first button poll.
    pub fn with_script(time: SimTime, script: Script) -> Self {
        let rest = script.rest;
        Self {
            script: Some(script),
            ..Self::new(time, rest)
        }
    }

    /// Makes every subsequent read fail.
    pub fn fail_reads(&mut self) {
        self.failing = true;
    }

    /// Sets the raw stick readings used outside of a script.
    pub fn set_axes(&mut self, x: u16, y: u16) {
        self.manual.x = x;
        self.manual.y = y;
    }

    /// Sets a button level used outside of a script.
    pub fn set_pressed(&mut self, button: Button, pressed: bool) {
        let levels = &mut self.manual.levels;
        match button {
            Button::Draw => levels.draw = pressed,
            Button::Tool => levels.tool = pressed,
            Button::Undo => levels.undo = pressed,
            Button::Wheel => levels.wheel = pressed,
        }
    }

    fn elapsed(&self) -> Option<u64> {
        self.origin
            .map(|origin| self.time.get().saturating_sub(origin))
    }

    fn frame(&self) -> InputFrame {
        match (&self.script, self.elapsed()) {
            (Some(script), Some(elapsed)) => script.frame_at(elapsed),
            (Some(script), None) => InputFrame::at_rest(script.rest),
            (None, _) => self.manual,
        }
    }

    fn check(&self, channel: impl std::fmt::Display) -> Result<(), HalError> {
        let scripted_failure = match (&self.script, self.elapsed()) {
            (Some(script), Some(elapsed)) => script.fail_at_ms.is_some_and(|at| elapsed >= at),
            _ => false,
        };
        if self.failing || scripted_failure {
            return Err(HalError::ReadFailed {
                channel: channel.to_string(),
                reason: "simulated bus fault".to_string(),
            });
        }
        Ok(())
    }
}

impl InputDevice for SimInput {
    fn init(&mut self) -> Result<(), HalError> {
        self.check("input peripheral")
    }

    fn read_axis(&mut self, axis: Axis) -> Result<u16, HalError> {
        self.check(axis)?;
        let queued = match axis {
            Axis::X => self.queued_x.pop_front(),
            Axis::Y => self.queued_y.pop_front(),
        };
        if let Some(sample) = queued {
            return Ok(sample);
        }
        let frame = self.frame();
        Ok(match axis {
            Axis::X => frame.x,
            Axis::Y => frame.y,
        })
    }

    fn is_pressed(&mut self, button: Button) -> Result<bool, HalError> {
        if self.origin.is_none() {
            self.origin = Some(self.time.get());
        }
        self.check(button)?;
        let levels = self.frame().levels;
        Ok(match button {
            Button::Draw => levels.draw,
            Button::Tool => levels.tool,
            Button::Undo => levels.undo,
            Button::Wheel => levels.wheel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_only_on_delay() {
        let mut clock = SimClock::new();
        let time = clock.handle();
        assert_eq!(clock.now_ms(), 0);
        clock.delay_ms(15);
        assert_eq!(time.get(), 15);
    }

    #[test]
    fn push_region_clips_to_panel() {
        let mut display = SimDisplay::new(4, 4);
        display.push_region(2, 2, 3, 3, &[7; 9]);
        assert_eq!(display.pixel(3, 3), Some(7));
        assert_eq!(display.pixel(1, 1), Some(0));
        assert_eq!(display.stats().regions_pushed, 1);
    }

    #[test]
    fn unresponsive_panel_fails_init() {
        let mut display = SimDisplay::unresponsive(4, 4);
        assert!(display.init().is_err());
        assert!(!display.is_initialized());
    }

    #[test]
    fn script_time_starts_at_first_button_poll() {
        let mut clock = SimClock::new();
        let script = Script::parse(
            "[[step]]\nduration_ms = 20\nx = 4000\nbuttons = [\"draw\"]\n",
        )
        .unwrap();
        let mut input = SimInput::with_script(clock.handle(), script);

        clock.delay_ms(500);
        assert_eq!(input.read_axis(Axis::X).unwrap(), 2048);
        assert!(input.is_pressed(Button::Draw).unwrap());
        assert_eq!(input.read_axis(Axis::X).unwrap(), 4000);

        clock.delay_ms(20);
        assert!(!input.is_pressed(Button::Draw).unwrap());
    }

    #[test]
    fn scripted_fault_starts_at_offset() {
        let mut clock = SimClock::new();
        let script = Script::parse("fail_at_ms = 10\n").unwrap();
        let mut input = SimInput::with_script(clock.handle(), script);
        assert!(input.is_pressed(Button::Tool).is_ok());
        clock.delay_ms(10);
        assert!(input.is_pressed(Button::Tool).is_err());
        assert!(input.read_axis(Axis::Y).is_err());
    }
}
