//! The NOVA universe scene.
//!
//! Glues the surface builder, the particle fields and the render loop into one
//! [`Universe`] built from a [`nova_config::Config`]. The free functions are the
//! same entry points for hosts that manage their own buffers.

mod error;
mod params;
mod presets;
mod scene;
mod universe;

pub use error::UniverseError;
pub use nova_planet::build_surface;
pub use params::{sky_bounds, sky_style, star_bounds, star_style, surface_style, terrain_params, validate};
pub use presets::{RING_PLANETS, RingPlanet, rgb, ring_layout};
pub use scene::{
    PLANET_GROUP, RING_GROUP, SKY_GROUP, STARFIELD_GROUP, SceneMotion, build_particle_field,
    start_animation, start_motion,
};
pub use universe::Universe;
