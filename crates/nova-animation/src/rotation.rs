//! Group rotation driven by elapsed time.

use glam::Quat;

/// Accumulated Y-axis angle of one rotating group.
///
/// The angle grows without bound; trigonometric consumers wrap it
/// implicitly. It is stored as `f64` so hours of accumulation stay precise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    angle: f64,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle(angle: f64) -> Self {
        Self { angle }
    }

    /// Angle in radians, narrowed for rendering.
    pub fn angle(&self) -> f32 {
        self.angle as f32
    }

    pub fn angle_f64(&self) -> f64 {
        self.angle
    }

    /// Rotation about +Y.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angle.rem_euclid(std::f64::consts::TAU) as f32)
    }

    pub fn advance(&mut self, angular_velocity: f32, delta_time: f32) {
        self.angle += angular_velocity as f64 * delta_time as f64;
    }
}

/// Advance `state` by `angular_velocity * delta_time`.
pub fn update(state: &mut RotationState, angular_velocity: f32, delta_time: f32) {
    state.advance(angular_velocity, delta_time);
}

/// A named group with its own angular velocity and rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinningGroup {
    pub name: String,
    /// Radians per second about +Y.
    pub angular_velocity: f32,
    pub rotation: RotationState,
}

impl SpinningGroup {
    pub fn new(name: impl Into<String>, angular_velocity: f32) -> Self {
        Self {
            name: name.into(),
            angular_velocity,
            rotation: RotationState::new(),
        }
    }

    pub fn advance(&mut self, delta_time: f32) {
        update(&mut self.rotation, self.angular_velocity, delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut state = RotationState::new();
        update(&mut state, 0.4, 0.5);
        update(&mut state, 0.4, 0.25);
        assert!((state.angle() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_is_frame_rate_independent() {
        let even = vec![1.0_f32 / 60.0; 600];
        let uneven: Vec<f32> = (0..400)
            .map(|i| if i % 2 == 0 { 0.01 } else { 0.04 })
            .collect();

        let total_even: f64 = even.iter().map(|&d| d as f64).sum();
        let total_uneven: f64 = uneven.iter().map(|&d| d as f64).sum();
        assert!((total_even - 10.0).abs() < 1e-4);
        assert!((total_uneven - 10.0).abs() < 1e-4);

        let mut a = RotationState::new();
        let mut b = RotationState::new();
        even.iter().for_each(|&d| update(&mut a, 0.4, d));
        uneven.iter().for_each(|&d| update(&mut b, 0.4, d));

        assert!(
            (a.angle_f64() - b.angle_f64()).abs() < 1e-4,
            "{} vs {}",
            a.angle_f64(),
            b.angle_f64()
        );
        assert!((a.angle_f64() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_groups_are_independent() {
        let mut planet = SpinningGroup::new("planet", 0.4);
        let mut stars = SpinningGroup::new("stars", 0.01);
        let mut ring = SpinningGroup::new("ring", 0.04);
        for _ in 0..120 {
            planet.advance(1.0 / 60.0);
            stars.advance(1.0 / 60.0);
        }
        ring.advance(2.0);

        assert!((planet.rotation.angle() - 0.8).abs() < 1e-4);
        assert!((stars.rotation.angle() - 0.02).abs() < 1e-5);
        assert!((ring.rotation.angle() - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_large_angles_still_rotate() {
        let state = RotationState::with_angle(1000.0 * std::f64::consts::TAU + std::f64::consts::FRAC_PI_2);
        let v = state.rotation() * glam::Vec3::X;
        // Quarter turn about +Y takes +X to -Z.
        assert!((v - glam::Vec3::NEG_Z).length() < 1e-4, "{v}");
    }

    #[test]
    fn test_negative_velocity_reverses() {
        let mut group = SpinningGroup::new("retro", -1.0);
        group.advance(0.5);
        assert!((group.rotation.angle() + 0.5).abs() < 1e-6);
    }
}
