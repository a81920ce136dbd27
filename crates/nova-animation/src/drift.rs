//! Gentle sinusoidal positional drift.

use glam::Vec3;

/// Drifts an object diagonally along a slow sine, scaled by the frame delta.
///
/// The phase comes from accumulated frame time rather than a wall clock, so
/// a paused loop resumes where it stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    clock: f64,
    /// Angular frequency of the sine, radians per second.
    pub frequency: f32,
    /// Peak drift speed in units per second.
    pub amplitude: f32,
}

impl Default for Drift {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}

impl Drift {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            clock: 0.0,
            frequency,
            amplitude,
        }
    }

    /// Advance the clock and return this frame's offset: `(d, -d / 2, 0)`.
    pub fn step(&mut self, delta_time: f32) -> Vec3 {
        self.clock += delta_time as f64;
        let d = (self.clock * self.frequency as f64).sin() as f32 * self.amplitude * delta_time;
        Vec3::new(d, -0.5 * d, 0.0)
    }

    pub fn apply(&mut self, position: &mut Vec3, delta_time: f32) {
        *position += self.step(delta_time);
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }
}
