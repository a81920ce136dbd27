//! Randomized particle field generation.

use glam::{Mat4, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::bounds::FieldBounds;

/// Per-instance placement within its group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    /// Uniform scale applied to the shared base geometry.
    pub scale: f32,
}

impl InstanceTransform {
    /// Transform that hides an instance (zero scale at the origin).
    pub const HIDDEN: Self = Self {
        position: Vec3::ZERO,
        scale: 0.0,
    };

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), Quat::IDENTITY, self.position)
    }
}

/// One generated instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleInstance {
    pub transform: InstanceTransform,
    /// Palette color, or `None` to use the sink's shared color.
    pub color: Option<[f32; 3]>,
}

/// Appearance parameters for a generated field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
    /// Scale is `lerp(min, max, r)` with an independent draw per instance.
    pub size_range: (f32, f32),
    /// Colors drawn uniformly per instance. Empty means every instance uses
    /// the sink's shared emissive color.
    pub palette: Vec<[f32; 3]>,
    /// Shared color of a freshly allocated sink.
    pub base_color: [f32; 3],
    /// Emissive intensity shared by the whole field.
    pub emissive: f32,
}

impl FieldStyle {
    pub fn uniform(min_size: f32, max_size: f32) -> Self {
        Self {
            size_range: (min_size, max_size),
            palette: Vec::new(),
            base_color: [1.0; 3],
            emissive: 1.0,
        }
    }

    pub fn with_palette(mut self, palette: Vec<[f32; 3]>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_base_color(mut self, color: [f32; 3]) -> Self {
        self.base_color = color;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

/// Draws particle fields from a ChaCha8 stream.
///
/// Seeded generators reproduce the same field on every run; generators from
/// [`ParticleFieldGenerator::from_entropy`] give a fresh sky per mount.
pub struct ParticleFieldGenerator {
    rng: ChaCha8Rng,
}

impl ParticleFieldGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Generate exactly `count` instances. Index `i` of the result is the
    /// instance's permanent slot in the host buffer.
    pub fn generate(
        &mut self,
        count: usize,
        bounds: &FieldBounds,
        style: &FieldStyle,
    ) -> Vec<ParticleInstance> {
        let (min_size, max_size) = style.size_range;
        let mut instances = Vec::with_capacity(count);

        for _ in 0..count {
            let position = bounds.sample(&mut self.rng);
            let t: f32 = self.rng.random();
            let scale = min_size + (max_size - min_size) * t;
            let color = if style.palette.is_empty() {
                None
            } else {
                Some(style.palette[self.rng.random_range(0..style.palette.len())])
            };
            instances.push(ParticleInstance {
                transform: InstanceTransform { position, scale },
                color,
            });
        }

        info!(
            count,
            palette = style.palette.len(),
            "particle field generated"
        );
        instances
    }
}
