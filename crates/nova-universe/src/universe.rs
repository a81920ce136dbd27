//! The assembled scene: planet, star box, sky shell and planet ring.

use glam::{Quat, Vec3};
use nova_animation::{CancelHandle, Drift, LoopState, RefreshHost, RefreshToken, RenderLoop, SpinningGroup};
use nova_config::{Config, MotionConfig};
use nova_planet::{BuildOutcome, SurfaceInit, SurfaceMesh, SurfaceStyle};
use nova_space::{InstanceBuffer, ParticleFieldGenerator};
use nova_terrain::TrigTerrain;
use tracing::{debug, info};

use crate::error::UniverseError;
use crate::params;
use crate::presets::ring_layout;
use crate::scene::{
    PLANET_GROUP, RING_GROUP, SKY_GROUP, STARFIELD_GROUP, SceneMotion, build_particle_field,
    start_motion,
};

/// CPU-side scene plus its render loop.
///
/// Built once from a [`Config`]. [`Universe::start`] attaches the render loop
/// to a host; [`Universe::teardown`] (or drop) cancels it before any buffer
/// is released.
pub struct Universe {
    planet: SurfaceMesh,
    surface_init: SurfaceInit,
    terrain: TrigTerrain,
    planet_position: Vec3,
    stars: InstanceBuffer,
    sky: InstanceBuffer,
    ring: InstanceBuffer,
    motion: Option<SceneMotion>,
    render_loop: Option<RenderLoop<SceneMotion>>,
    max_frame_time: f32,
    released: bool,
}

fn scene_motion(config: &MotionConfig) -> SceneMotion {
    let motion = SceneMotion::new(vec![
        SpinningGroup::new(PLANET_GROUP, config.planet_spin),
        SpinningGroup::new(STARFIELD_GROUP, config.starfield_speed),
        SpinningGroup::new(RING_GROUP, config.ring_speed),
        SpinningGroup::new(SKY_GROUP, config.sky_speed),
    ]);
    if config.drift {
        motion.with_drift(Drift::new(config.drift_frequency, config.drift_amplitude))
    } else {
        motion
    }
}

impl Universe {
    /// Build every buffer from `config`. The render loop is not started.
    pub fn build(config: &Config) -> Result<Self, UniverseError> {
        params::validate(config)?;

        let surface = &config.surface;
        let style = params::surface_style(surface)?;
        let terrain = TrigTerrain::new(params::terrain_params(surface));
        let mut planet =
            SurfaceMesh::uv_sphere(style.base_radius, surface.width_segments, surface.height_segments);
        let mut surface_init = SurfaceInit::new(style);
        surface_init.ensure(&mut planet, &terrain);

        let mut star_rng = ParticleFieldGenerator::new(config.starfield.seed);
        let stars = build_particle_field(
            &mut star_rng,
            config.starfield.count,
            &params::star_bounds(&config.starfield),
            &params::star_style(&config.starfield)?,
        );

        let mut sky_rng = ParticleFieldGenerator::new(config.sky.seed);
        let sky = build_particle_field(
            &mut sky_rng,
            config.sky.count,
            &params::sky_bounds(&config.sky),
            &params::sky_style(&config.sky)?,
        );

        let ring = if config.planets.enabled {
            InstanceBuffer::from_fixed(&ring_layout(config.planets.emissive_intensity))
        } else {
            InstanceBuffer::default()
        };

        info!(
            vertices = planet.vertex_count(),
            stars = stars.len(),
            sky = sky.len(),
            ring = ring.len(),
            "universe built"
        );

        Ok(Self {
            planet,
            surface_init,
            terrain,
            planet_position: Vec3::from_array(surface.position),
            stars,
            sky,
            ring,
            motion: Some(scene_motion(&config.motion)),
            render_loop: None,
            max_frame_time: config.render_loop.max_frame_time,
            released: false,
        })
    }

    /// Attach the render loop to `host`. Later calls return the existing
    /// loop's handle.
    ///
    /// After [`Universe::teardown`] this requests nothing from `host` and
    /// returns an already cancelled handle.
    pub fn start<H: RefreshHost + ?Sized>(&mut self, host: &mut H) -> CancelHandle {
        if let Some(render_loop) = &self.render_loop {
            return render_loop.handle();
        }
        if self.released {
            let mut render_loop = RenderLoop::new(SceneMotion::default(), SceneMotion::advance);
            render_loop.cancel(host);
            debug!("start after teardown, loop stays cancelled");
            let handle = render_loop.handle();
            self.render_loop = Some(render_loop);
            return handle;
        }
        let motion = self.motion.take().unwrap_or_default();
        let (render_loop, handle) = start_motion(motion, host, self.max_frame_time);
        self.render_loop = Some(render_loop);
        handle
    }

    /// Forward a host refresh to the render loop.
    pub fn on_refresh<H: RefreshHost + ?Sized>(
        &mut self,
        host: &mut H,
        token: RefreshToken,
        timestamp: f64,
    ) -> bool {
        match self.render_loop.as_mut() {
            Some(render_loop) => render_loop.on_refresh(host, token, timestamp),
            None => false,
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop
            .as_ref()
            .map_or(LoopState::Idle, RenderLoop::loop_state)
    }

    pub fn render_loop(&self) -> Option<&RenderLoop<SceneMotion>> {
        self.render_loop.as_ref()
    }

    pub fn render_loop_mut(&mut self) -> Option<&mut RenderLoop<SceneMotion>> {
        self.render_loop.as_mut()
    }

    /// Current motion state, whether or not the loop has started.
    pub fn motion(&self) -> Option<&SceneMotion> {
        match &self.render_loop {
            Some(render_loop) => Some(render_loop.state()),
            None => self.motion.as_ref(),
        }
    }

    /// Accumulated angle of a named group.
    pub fn group_angle(&self, name: &str) -> Option<f32> {
        self.motion()?.group(name).map(|g| g.rotation.angle())
    }

    pub fn group_rotation(&self, name: &str) -> Option<Quat> {
        self.motion()?.group(name).map(|g| g.rotation.rotation())
    }

    /// Planet center including any drift.
    pub fn planet_position(&self) -> Vec3 {
        let drift = self.motion().map_or(Vec3::ZERO, |m| m.drift_offset);
        self.planet_position + drift
    }

    pub fn planet(&self) -> &SurfaceMesh {
        &self.planet
    }

    pub fn planet_mut(&mut self) -> &mut SurfaceMesh {
        &mut self.planet
    }

    pub fn stars(&self) -> &InstanceBuffer {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.stars
    }

    pub fn sky(&self) -> &InstanceBuffer {
        &self.sky
    }

    pub fn sky_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.sky
    }

    pub fn ring(&self) -> &InstanceBuffer {
        &self.ring
    }

    pub fn ring_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.ring
    }

    pub fn surface_outcome(&self) -> Option<BuildOutcome> {
        self.surface_init.last_outcome()
    }

    /// Lifecycle signal for the planet surface. Builds only if the current
    /// style has not been applied yet.
    pub fn refresh_surface(&mut self) -> Option<BuildOutcome> {
        if self.released {
            return None;
        }
        self.surface_init.ensure(&mut self.planet, &self.terrain)
    }

    /// Swap the surface style. The new style is applied on the next
    /// [`Universe::refresh_surface`] and only if it differs.
    pub fn set_surface_style(&mut self, style: SurfaceStyle) {
        self.surface_init.set_style(style);
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Cancel the render loop, withdraw its pending refresh from `host`, then
    /// release every buffer. Idempotent.
    pub fn teardown<H: RefreshHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(render_loop) = self.render_loop.as_mut() {
            render_loop.cancel(host);
        }
        self.release_buffers();
    }

    fn release_buffers(&mut self) {
        if self.released {
            return;
        }
        self.planet = SurfaceMesh::default();
        self.stars = InstanceBuffer::default();
        self.sky = InstanceBuffer::default();
        self.ring = InstanceBuffer::default();
        self.motion = None;
        self.released = true;
        debug!("universe buffers released");
    }
}

impl Drop for Universe {
    fn drop(&mut self) {
        // No host here: the loop stops through its handle and any request
        // still queued in the host is left to go stale.
        if let Some(render_loop) = &self.render_loop {
            render_loop.handle().cancel();
        }
        self.render_loop = None;
        self.release_buffers();
    }
}
