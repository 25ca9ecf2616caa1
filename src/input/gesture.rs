//! Tap/hold classification for the digital buttons.
//!
//! Each button runs a small state machine: a press starts timing, crossing the
//! hold threshold fires the hold action exactly once, and a release fires the
//! tap action only if the hold never fired. The color wheel button has its own
//! modal machine (`Idle -> Pending -> Tracking -> Idle`) that is advanced by
//! the same outer tick instead of a nested loop.

use crate::config::GestureConfig;

/// Result of classifying one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Released before the hold threshold
    Tap,
    /// Held past the threshold (fires once per press)
    Hold,
}

/// Timing state of one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pressed: bool,
    pressed_at: u64,
    handled: bool,
}

impl ButtonState {
    /// Feeds the current level and returns any gesture it completes.
    pub fn update(&mut self, pressed: bool, now_ms: u64, hold_ms: u64) -> Option<Gesture> {
        match (self.pressed, pressed) {
            (false, true) => {
                self.pressed = true;
                self.pressed_at = now_ms;
                self.handled = false;
                self.check_hold(now_ms, hold_ms)
            }
            (true, true) => self.check_hold(now_ms, hold_ms),
            (true, false) => {
                self.pressed = false;
                if self.handled {
                    None
                } else {
                    Some(Gesture::Tap)
                }
            }
            (false, false) => None,
        }
    }

    fn check_hold(&mut self, now_ms: u64, hold_ms: u64) -> Option<Gesture> {
        if !self.handled && now_ms.saturating_sub(self.pressed_at) >= hold_ms {
            self.handled = true;
            Some(Gesture::Hold)
        } else {
            None
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the hold action already fired for the current press.
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// Color wheel modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelState {
    #[default]
    Idle,
    /// Button down, hold threshold not reached yet
    Pending { since: u64 },
    /// Hold threshold crossed; the stick now picks the color
    Tracking,
}

/// Sampled button levels for one tick (true = pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub draw: bool,
    pub tool: bool,
    pub undo: bool,
    pub wheel: bool,
}

/// Actions produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Tool tap
    CycleSize,
    /// Tool hold
    ToggleEraser,
    /// Undo tap
    Undo,
    /// Undo hold
    Clear,
    /// Wheel released before the hold threshold
    TogglePalette,
    /// Wheel entered tracking this tick
    WheelOpened,
    /// Wheel is tracking; re-sample the stick and recompute the color
    WheelTrack,
    /// Wheel released after tracking; keep the last color
    WheelClosed,
}

/// Classifier for all buttons of the device.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    tool: ButtonState,
    undo: ButtonState,
    wheel: WheelState,
    tool_hold_ms: u64,
    clear_hold_ms: u64,
    wheel_hold_ms: u64,
}

impl GestureClassifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            tool: ButtonState::default(),
            undo: ButtonState::default(),
            wheel: WheelState::Idle,
            tool_hold_ms: config.tool_hold_ms,
            clear_hold_ms: config.clear_hold_ms,
            wheel_hold_ms: config.wheel_hold_ms,
        }
    }

    pub fn wheel_state(&self) -> WheelState {
        self.wheel
    }

    /// True while the wheel button owns the tick (motion and drawing paused).
    pub fn is_modal(&self) -> bool {
        self.wheel != WheelState::Idle
    }

    /// Classifies one tick of button levels.
    ///
    /// While the wheel is modal only the wheel button is looked at; the other
    /// buttons resume once it is released.
    pub fn classify(&mut self, levels: ButtonLevels, now_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        if self.is_modal() || levels.wheel {
            self.classify_wheel(levels.wheel, now_ms, &mut events);
            return events;
        }

        match self.tool.update(levels.tool, now_ms, self.tool_hold_ms) {
            Some(Gesture::Tap) => events.push(GestureEvent::CycleSize),
            Some(Gesture::Hold) => events.push(GestureEvent::ToggleEraser),
            None => {}
        }

        match self.undo.update(levels.undo, now_ms, self.clear_hold_ms) {
            Some(Gesture::Tap) => events.push(GestureEvent::Undo),
            Some(Gesture::Hold) => events.push(GestureEvent::Clear),
            None => {}
        }

        events
    }

    fn classify_wheel(&mut self, pressed: bool, now_ms: u64, events: &mut Vec<GestureEvent>) {
        let next = match (self.wheel, pressed) {
            (WheelState::Idle, true) => {
                log::debug!("Color wheel button down");
                self.pending_or_tracking(now_ms, now_ms, events)
            }
            (WheelState::Pending { since }, true) => {
                self.pending_or_tracking(since, now_ms, events)
            }
            (WheelState::Tracking, true) => {
                events.push(GestureEvent::WheelTrack);
                WheelState::Tracking
            }
            (WheelState::Pending { .. }, false) => {
                events.push(GestureEvent::TogglePalette);
                WheelState::Idle
            }
            (WheelState::Tracking, false) => {
                events.push(GestureEvent::WheelClosed);
                WheelState::Idle
            }
            (WheelState::Idle, false) => WheelState::Idle,
        };
        self.wheel = next;
    }

    fn pending_or_tracking(
        &self,
        since: u64,
        now_ms: u64,
        events: &mut Vec<GestureEvent>,
    ) -> WheelState {
        if now_ms.saturating_sub(since) >= self.wheel_hold_ms {
            events.push(GestureEvent::WheelOpened);
            events.push(GestureEvent::WheelTrack);
            WheelState::Tracking
        } else {
            WheelState::Pending { since }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(&GestureConfig::default())
    }

    fn levels(tool: bool, undo: bool, wheel: bool) -> ButtonLevels {
        ButtonLevels {
            draw: false,
            tool,
            undo,
            wheel,
        }
    }

    #[test]
    fn short_press_is_a_tap() {
        let mut state = ButtonState::default();
        assert_eq!(state.update(true, 0, 500), None);
        assert_eq!(state.update(true, 200, 500), None);
        assert_eq!(state.update(false, 300, 500), Some(Gesture::Tap));
    }

    #[test]
    fn hold_fires_once_and_release_is_silent() {
        let mut state = ButtonState::default();
        state.update(true, 0, 500);
        assert_eq!(state.update(true, 500, 500), Some(Gesture::Hold));
        assert!(state.is_handled());
        assert_eq!(state.update(true, 900, 500), None);
        assert_eq!(state.update(true, 5000, 500), None);
        assert_eq!(state.update(false, 5010, 500), None);

        // next press starts fresh
        state.update(true, 6000, 500);
        assert!(!state.is_handled());
        assert_eq!(state.update(false, 6100, 500), Some(Gesture::Tap));
    }

    #[test]
    fn tool_and_undo_map_to_actions() {
        let mut c = classifier();
        assert!(c.classify(levels(true, false, false), 0).is_empty());
        assert_eq!(
            c.classify(levels(false, false, false), 100),
            vec![GestureEvent::CycleSize]
        );

        c.classify(levels(false, true, false), 1000);
        assert!(c.classify(levels(false, true, false), 1799).is_empty());
        assert_eq!(
            c.classify(levels(false, true, false), 1800),
            vec![GestureEvent::Clear]
        );
        assert!(c.classify(levels(false, false, false), 1900).is_empty());

        c.classify(levels(false, true, false), 2000);
        assert_eq!(
            c.classify(levels(false, false, false), 2100),
            vec![GestureEvent::Undo]
        );
    }

    #[test]
    fn tool_hold_toggles_eraser() {
        let mut c = classifier();
        c.classify(levels(true, false, false), 0);
        assert_eq!(
            c.classify(levels(true, false, false), 500),
            vec![GestureEvent::ToggleEraser]
        );
        assert!(c.classify(levels(false, false, false), 700).is_empty());
    }

    #[test]
    fn wheel_tap_toggles_palette() {
        let mut c = classifier();
        assert!(c.classify(levels(false, false, true), 0).is_empty());
        assert_eq!(c.wheel_state(), WheelState::Pending { since: 0 });
        assert!(c.is_modal());
        assert_eq!(
            c.classify(levels(false, false, false), 200),
            vec![GestureEvent::TogglePalette]
        );
        assert_eq!(c.wheel_state(), WheelState::Idle);
    }

    #[test]
    fn wheel_hold_tracks_until_release() {
        let mut c = classifier();
        c.classify(levels(false, false, true), 0);
        assert!(c.classify(levels(false, false, true), 150).is_empty());
        assert_eq!(
            c.classify(levels(false, false, true), 300),
            vec![GestureEvent::WheelOpened, GestureEvent::WheelTrack]
        );
        assert_eq!(c.wheel_state(), WheelState::Tracking);
        assert_eq!(
            c.classify(levels(false, false, true), 310),
            vec![GestureEvent::WheelTrack]
        );
        assert_eq!(
            c.classify(levels(false, false, false), 320),
            vec![GestureEvent::WheelClosed]
        );
        assert!(!c.is_modal());
    }

    #[test]
    fn other_buttons_ignored_while_wheel_is_modal() {
        let mut c = classifier();
        c.classify(levels(false, false, true), 0);
        assert!(c.classify(levels(true, false, true), 10).is_empty());
        assert!(c.classify(levels(false, false, true), 20).is_empty());
        // the tool tap happened entirely inside the modal state
        assert_eq!(
            c.classify(levels(false, false, false), 30),
            vec![GestureEvent::TogglePalette]
        );
        assert!(c.classify(levels(false, false, false), 40).is_empty());
    }
}
