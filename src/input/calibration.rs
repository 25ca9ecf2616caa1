//! Stick rest-position calibration.

use super::Axis;
use crate::error::HalError;
use crate::hal::{Clock, InputDevice};

/// Per-axis rest position measured once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    center_x: f32,
    center_y: f32,
}

impl Calibration {
    pub fn new(center_x: f32, center_y: f32) -> Self {
        Self { center_x, center_y }
    }

    /// Averages `samples` readings of each axis, `delay_ms` apart.
    ///
    /// The stick must be left alone while this runs. Read failures are
    /// returned as-is; the caller treats them as fatal.
    pub fn measure<I, C>(
        input: &mut I,
        clock: &mut C,
        samples: u32,
        delay_ms: u32,
    ) -> Result<Self, HalError>
    where
        I: InputDevice + ?Sized,
        C: Clock + ?Sized,
    {
        let samples = samples.max(1);
        let mut sum_x: u64 = 0;
        let mut sum_y: u64 = 0;

        for _ in 0..samples {
            sum_x += u64::from(input.read_axis(Axis::X)?);
            sum_y += u64::from(input.read_axis(Axis::Y)?);
            clock.delay_ms(delay_ms);
        }

        let calibration = Self {
            center_x: sum_x as f32 / samples as f32,
            center_y: sum_y as f32 / samples as f32,
        };
        log::info!(
            "Calibrated stick center at ({:.1}, {:.1}) from {samples} samples",
            calibration.center_x,
            calibration.center_y
        );
        Ok(calibration)
    }

    pub fn center(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.center_x,
            Axis::Y => self.center_y,
        }
    }

    /// Raw reading minus rest position, per axis.
    pub fn deflection(&self, raw_x: u16, raw_y: u16) -> (f32, f32) {
        (
            f32::from(raw_x) - self.center_x,
            f32::from(raw_y) - self.center_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::sim::{SimClock, SimInput};

    #[test]
    fn mean_of_alternating_samples() {
        let mut clock = SimClock::new();
        let mut input = SimInput::with_axis_samples(
            clock.handle(),
            (0..50)
                .map(|i| match i {
                    48 | 49 => 2045,
                    _ if i % 2 == 0 => 2040,
                    _ => 2050,
                })
                .collect(),
            vec![1000; 50],
        );

        let calibration = Calibration::measure(&mut input, &mut clock, 50, 5).unwrap();
        assert_eq!(calibration.center(Axis::X), 2045.0);
        assert_eq!(calibration.center(Axis::Y), 1000.0);
        assert_eq!(clock.now_ms(), 250);
        assert_eq!(calibration.deflection(2045, 1000), (0.0, 0.0));
    }

    #[test]
    fn read_failure_propagates() {
        let mut clock = SimClock::new();
        let mut input = SimInput::with_axis_samples(clock.handle(), vec![2048; 3], vec![2048; 3]);
        input.fail_reads();
        assert!(Calibration::measure(&mut input, &mut clock, 3, 1).is_err());
    }
}
