//! Scene-level entry points: field upload and the animation loop.

use glam::Vec3;
use nova_animation::{CancelHandle, Drift, RefreshHost, RenderLoop, SpinningGroup};
use nova_space::{FieldBounds, FieldStyle, InstanceBuffer, ParticleFieldGenerator, write_field};
use tracing::debug;

pub const PLANET_GROUP: &str = "planet";
pub const STARFIELD_GROUP: &str = "starfield";
pub const RING_GROUP: &str = "ring";
pub const SKY_GROUP: &str = "sky";

/// Everything the render loop updates each frame.
#[derive(Clone, Debug, Default)]
pub struct SceneMotion {
    pub groups: Vec<SpinningGroup>,
    /// Optional drift applied to the planet position.
    pub drift: Option<Drift>,
    /// Accumulated drift offset.
    pub drift_offset: Vec3,
}

impl SceneMotion {
    pub fn new(groups: Vec<SpinningGroup>) -> Self {
        Self {
            groups,
            drift: None,
            drift_offset: Vec3::ZERO,
        }
    }

    pub fn with_drift(mut self, drift: Drift) -> Self {
        self.drift = Some(drift);
        self
    }

    /// Per-frame update.
    pub fn advance(&mut self, delta_time: f32) {
        for group in &mut self.groups {
            group.advance(delta_time);
        }
        if let Some(drift) = self.drift.as_mut() {
            drift.apply(&mut self.drift_offset, delta_time);
        }
    }

    pub fn group(&self, name: &str) -> Option<&SpinningGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Generate `count` instances inside `bounds` and upload them into a fresh
/// buffer sized exactly for them.
pub fn build_particle_field(
    generator: &mut ParticleFieldGenerator,
    count: usize,
    bounds: &FieldBounds,
    style: &FieldStyle,
) -> InstanceBuffer {
    let instances = generator.generate(count, bounds, style);
    let mut buffer = InstanceBuffer::new(count, style.base_color, style.emissive);
    let written = write_field(&mut buffer, &instances);
    debug!(written, "particle field uploaded");
    buffer
}

/// Start a render loop that advances `groups` every refresh.
pub fn start_animation<H>(
    groups: Vec<SpinningGroup>,
    host: &mut H,
    max_frame_time: f32,
) -> (RenderLoop<SceneMotion>, CancelHandle)
where
    H: RefreshHost + ?Sized,
{
    start_motion(SceneMotion::new(groups), host, max_frame_time)
}

/// Like [`start_animation`] with a prepared [`SceneMotion`].
pub fn start_motion<H>(
    motion: SceneMotion,
    host: &mut H,
    max_frame_time: f32,
) -> (RenderLoop<SceneMotion>, CancelHandle)
where
    H: RefreshHost + ?Sized,
{
    let mut render_loop =
        RenderLoop::new(motion, SceneMotion::advance).with_max_frame_time(max_frame_time);
    let handle = render_loop.start(host);
    (render_loop, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_animation::{LoopState, ManualRefreshHost};
    use nova_space::InstanceDirty;

    fn stock_groups() -> Vec<SpinningGroup> {
        vec![
            SpinningGroup::new(PLANET_GROUP, 0.4),
            SpinningGroup::new(STARFIELD_GROUP, 0.01),
            SpinningGroup::new(RING_GROUP, 0.04),
        ]
    }

    #[test]
    fn test_particle_field_fills_buffer() {
        let mut generator = ParticleFieldGenerator::from_seed(3);
        let style = FieldStyle::uniform(0.01, 0.02).with_emissive(2.5);
        let mut buffer = build_particle_field(&mut generator, 1000, &FieldBounds::cube(10.0), &style);
        assert_eq!(buffer.len(), 1000);
        for i in 0..1000 {
            let t = buffer.transform(i).unwrap();
            assert!(t.position.abs().max_element() <= 10.0);
            assert!((0.01..=0.02).contains(&t.scale));
            assert_eq!(buffer.emissive(i), Some(2.5));
        }
        assert!(buffer.take_dirty().contains(InstanceDirty::TRANSFORMS));
    }

    #[test]
    fn test_empty_field() {
        let mut generator = ParticleFieldGenerator::from_seed(3);
        let buffer = build_particle_field(
            &mut generator,
            0,
            &FieldBounds::shell(1.0, 1.0),
            &FieldStyle::uniform(1.0, 1.0),
        );
        assert!(buffer.is_empty());
        assert!(buffer.dirty().is_empty());
    }

    #[test]
    fn test_groups_advance_at_their_own_speed() {
        let mut host = ManualRefreshHost::new();
        let (mut lp, handle) = start_animation(stock_groups(), &mut host, 0.25);
        assert_eq!(handle.state(), LoopState::Running);

        for frame in 0..=60 {
            host.refresh(&mut lp, frame as f64 / 60.0);
        }

        let motion = lp.state();
        let planet = motion.group(PLANET_GROUP).unwrap().rotation.angle();
        let stars = motion.group(STARFIELD_GROUP).unwrap().rotation.angle();
        let ring = motion.group(RING_GROUP).unwrap().rotation.angle();
        assert!((planet - 0.4).abs() < 1e-4, "planet {planet}");
        assert!((stars - 0.01).abs() < 1e-5, "stars {stars}");
        assert!((ring - 0.04).abs() < 1e-5, "ring {ring}");
        assert!(motion.group(SKY_GROUP).is_none());
    }

    #[test]
    fn test_cancel_freezes_motion() {
        let mut host = ManualRefreshHost::new();
        let (mut lp, handle) = start_animation(stock_groups(), &mut host, 0.25);
        host.refresh(&mut lp, 0.0);
        host.refresh(&mut lp, 0.1);
        handle.cancel();
        let frozen = lp.state().clone().groups;
        for i in 2..20 {
            host.refresh(&mut lp, i as f64 * 0.1);
        }
        assert_eq!(lp.state().groups, frozen);
    }

    #[test]
    fn test_drift_moves_offset() {
        let mut motion = SceneMotion::new(Vec::new()).with_drift(Drift::default());
        motion.advance(0.5);
        assert!(motion.drift_offset.x > 0.0);
        assert!(motion.drift_offset.y < 0.0);
        assert_eq!(motion.drift_offset.z, 0.0);
    }
}
