//! Stick deflection to cursor motion.

use super::Calibration;
use crate::config::MotionConfig;

/// Sub-pixel cursor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPosition {
    pub x: f32,
    pub y: f32,
}

impl CursorPosition {
    /// Pixel the cursor currently covers.
    pub fn pixel(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// Integrates deflection into position and keeps it inside the drawable area.
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    deadzone: f32,
    divisor: f32,
    max_speed: f32,
    invert_x: bool,
    invert_y: bool,
    margin: f32,
    width: f32,
    height: f32,
}

impl MotionIntegrator {
    pub fn new(config: &MotionConfig, width: usize, height: usize) -> Self {
        Self {
            deadzone: config.deadzone.max(0) as f32,
            divisor: config.divisor,
            max_speed: config.max_speed,
            invert_x: config.invert_x,
            invert_y: config.invert_y,
            margin: config.cursor_margin as f32,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Per-tick velocity contribution of one axis.
    pub fn step(&self, delta: f32, invert: bool) -> f32 {
        if delta.abs() < self.deadzone {
            return 0.0;
        }
        let speed = (delta / self.divisor).clamp(-self.max_speed, self.max_speed);
        if invert { -speed } else { speed }
    }

    /// Applies one tick of motion for the raw readings.
    pub fn integrate(
        &self,
        position: &mut CursorPosition,
        calibration: &Calibration,
        raw_x: u16,
        raw_y: u16,
    ) {
        let (dx, dy) = calibration.deflection(raw_x, raw_y);
        position.x += self.step(dx, self.invert_x);
        position.y += self.step(dy, self.invert_y);
        self.clamp(position);
    }

    /// Keeps the position in `[margin, dimension - margin - 1]` on both axes.
    pub fn clamp(&self, position: &mut CursorPosition) {
        position.x = position.x.clamp(self.margin, self.width - self.margin - 1.0);
        position.y = position.y.clamp(self.margin, self.height - self.margin - 1.0);
    }

    /// Canvas center, already clamped.
    pub fn home(&self) -> CursorPosition {
        let mut position = CursorPosition {
            x: (self.width / 2.0).floor(),
            y: (self.height / 2.0).floor(),
        };
        self.clamp(&mut position);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrator() -> MotionIntegrator {
        MotionIntegrator::new(&MotionConfig::default(), 480, 320)
    }

    fn center() -> Calibration {
        Calibration::new(2045.0, 2045.0)
    }

    #[test]
    fn inside_deadzone_does_not_move() {
        let motion = integrator();
        let mut pos = motion.home();
        let start = pos;
        for raw in [2045, 2045 + 119, 2045 - 119] {
            motion.integrate(&mut pos, &center(), raw, raw);
            assert_eq!(pos, start);
        }
    }

    #[test]
    fn deflection_moves_linearly_and_saturates() {
        let motion = integrator();
        let mut pos = motion.home();
        motion.integrate(&mut pos, &center(), 2045 + 400, 2045);
        assert_eq!(pos.x, 242.0);
        assert_eq!(pos.y, 160.0);

        let mut pos = motion.home();
        motion.integrate(&mut pos, &center(), 4095, 0);
        assert_eq!(pos.x, 250.0);
        assert_eq!(pos.y, 150.0);
    }

    #[test]
    fn position_stays_within_margins_for_extremes() {
        let motion = integrator();
        let mut pos = motion.home();
        let raws = [0u16, 4095, u16::MAX, 0, 4095];
        for _ in 0..200 {
            for &raw in &raws {
                motion.integrate(&mut pos, &center(), raw, u16::MAX - raw);
                assert!(pos.x >= 18.0 && pos.x <= 480.0 - 18.0 - 1.0);
                assert!(pos.y >= 18.0 && pos.y <= 320.0 - 18.0 - 1.0);
            }
        }
        for _ in 0..100 {
            motion.integrate(&mut pos, &center(), 0, 0);
        }
        assert_eq!(pos, CursorPosition { x: 18.0, y: 18.0 });
        for _ in 0..100 {
            motion.integrate(&mut pos, &center(), u16::MAX, u16::MAX);
        }
        assert_eq!(pos, CursorPosition { x: 461.0, y: 301.0 });
    }

    #[test]
    fn inverted_axis_flips_direction() {
        let config = MotionConfig {
            invert_y: true,
            ..MotionConfig::default()
        };
        let motion = MotionIntegrator::new(&config, 480, 320);
        let mut pos = motion.home();
        motion.integrate(&mut pos, &center(), 2045, 2045 + 1000);
        assert_eq!(pos.y, 155.0);
    }

    #[test]
    fn home_is_canvas_center() {
        assert_eq!(integrator().home().pixel(), (240, 160));
    }
}
