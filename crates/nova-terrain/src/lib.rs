//! Scalar terrain fields over the unit sphere.
//!
//! A terrain field maps a unit direction to an unbounded scalar. Surface
//! builders compare the value against a threshold to split land from sea and
//! use the excess above the threshold as relief. Fields are pure: the same
//! direction always yields the same bits.

mod error;
mod field;
mod mask;

pub use error::TerrainError;
pub use field::{Octave, TerrainField, TerrainParams, TrigTerrain, Wave};
pub use mask::{EquirectMask, direction_to_equirect_uv};
