//! Terrain sampled from an equirectangular luminance mask.

use glam::Vec3;

use crate::TerrainError;
use crate::field::TerrainField;

/// Map a unit direction to equirectangular UV coordinates in `[0, 1]`.
///
/// `u` follows the azimuth `atan2(z, x)`, `v` runs from the north pole (0)
/// to the south pole (1).
pub fn direction_to_equirect_uv(direction: Vec3) -> (f32, f32) {
    let u = 0.5 + direction.z.atan2(direction.x) / std::f32::consts::TAU;
    let v = 0.5 - direction.y.clamp(-1.0, 1.0).asin() / std::f32::consts::PI;
    (u, v)
}

/// A terrain field backed by an 8-bit luminance image in equirectangular
/// projection. Samples are `luminance / 255`, or `1 - luminance / 255` when
/// inverted (useful when bright texels mark water).
#[derive(Clone, Debug)]
pub struct EquirectMask {
    width: u32,
    height: u32,
    luminance: Vec<u8>,
    invert: bool,
}

impl EquirectMask {
    /// Wrap a row-major luminance buffer of `width * height` bytes.
    pub fn new(width: u32, height: u32, luminance: Vec<u8>) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyMask { width, height });
        }
        let expected = width as usize * height as usize;
        if luminance.len() != expected {
            return Err(TerrainError::MaskSize {
                width,
                height,
                expected,
                actual: luminance.len(),
            });
        }
        Ok(Self {
            width,
            height,
            luminance,
            invert: false,
        })
    }

    /// Flip the mask so that dark texels sample high.
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel lookup. UVs outside `[0, 1)` clamp to the border.
    fn texel(&self, u: f32, v: f32) -> u8 {
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as usize;
        self.luminance[y * self.width as usize + x]
    }
}

impl TerrainField for EquirectMask {
    fn sample(&self, direction: Vec3) -> f32 {
        let (u, v) = direction_to_equirect_uv(direction);
        let value = self.texel(u, v) as f32 / 255.0;
        if self.invert { 1.0 - value } else { value }
    }
}
