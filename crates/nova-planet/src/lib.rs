//! Procedural planet surfaces: sphere meshes whose vertices are classified,
//! colored and displaced by a terrain field.
//!
//! The surface is built exactly once per style. [`build_surface`] does the
//! per-vertex work against any host that implements [`SurfaceBuffers`];
//! [`SurfaceInit`] guards it so repeated lifecycle signals do not rebuild.

mod init;
mod mesh;
mod normals;
mod surface;

pub use init::SurfaceInit;
pub use mesh::{DirtyFlags, MAX_SEGMENTS, MeshBuffersMut, SurfaceBuffers, SurfaceMesh};
pub use normals::recompute_normals;
pub use surface::{
    BuildOutcome, BuildStats, SkipReason, SurfaceClass, SurfaceStyle, build_surface, classify,
    displaced_radius,
};
