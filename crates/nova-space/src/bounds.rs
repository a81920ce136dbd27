//! Volumes that particle positions are drawn from.

use glam::Vec3;
use rand::Rng;

/// Region a field's instance positions are sampled from, centered on the
/// group origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldBounds {
    /// Axis-aligned box; each axis is uniform in `[-half, half]`.
    Box { half_extents: Vec3 },
    /// Spherical shell; uniform in volume between the two radii.
    Shell { inner: f32, outer: f32 },
}

impl FieldBounds {
    /// A cube with the same half extent on every axis.
    pub fn cube(half_extent: f32) -> Self {
        FieldBounds::Box {
            half_extents: Vec3::splat(half_extent),
        }
    }

    /// A shell starting at `radius` and `depth` units thick.
    pub fn shell(radius: f32, depth: f32) -> Self {
        FieldBounds::Shell {
            inner: radius,
            outer: radius + depth,
        }
    }

    /// Draw one position.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        match *self {
            FieldBounds::Box { half_extents } => {
                let half = half_extents.abs();
                Vec3::new(
                    (rng.random::<f32>() * 2.0 - 1.0) * half.x,
                    (rng.random::<f32>() * 2.0 - 1.0) * half.y,
                    (rng.random::<f32>() * 2.0 - 1.0) * half.z,
                )
            }
            FieldBounds::Shell { inner, outer } => {
                // Uniform in solid angle: y uniform in [-1, 1], azimuth uniform.
                // Sampling latitude directly would bunch points at the poles.
                let y = 1.0 - 2.0 * rng.random::<f32>();
                let theta = rng.random::<f32>() * std::f32::consts::TAU;
                let ring = (1.0 - y * y).max(0.0).sqrt();
                let direction = Vec3::new(ring * theta.cos(), y, ring * theta.sin());

                let r0 = inner.min(outer).max(0.0);
                let r1 = inner.max(outer).max(0.0);
                let (c0, c1) = (r0 * r0 * r0, r1 * r1 * r1);
                let radius = (c0 + rng.random::<f32>() * (c1 - c0)).cbrt();
                direction * radius
            }
        }
    }

    /// Whether `p` lies inside the bounds, with a small tolerance.
    pub fn contains(&self, p: Vec3) -> bool {
        const EPS: f32 = 1e-3;
        match *self {
            FieldBounds::Box { half_extents } => {
                let half = half_extents.abs() + Vec3::splat(EPS);
                p.abs().cmple(half).all()
            }
            FieldBounds::Shell { inner, outer } => {
                let r = p.length();
                r >= inner.min(outer) - EPS && r <= inner.max(outer) + EPS
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_box_samples_stay_inside() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let bounds = FieldBounds::Box {
            half_extents: Vec3::new(60.0, 45.0, 60.0),
        };
        for _ in 0..10_000 {
            let p = bounds.sample(&mut rng);
            assert!(p.x.abs() <= 60.0 && p.y.abs() <= 45.0 && p.z.abs() <= 60.0);
        }
    }

    #[test]
    fn test_box_covers_all_octants() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let bounds = FieldBounds::cube(10.0);
        let mut octants = [0u32; 8];
        for _ in 0..8000 {
            let p = bounds.sample(&mut rng);
            let o = ((p.x >= 0.0) as usize)
                | (((p.y >= 0.0) as usize) << 1)
                | (((p.z >= 0.0) as usize) << 2);
            octants[o] += 1;
        }
        for (i, &n) in octants.iter().enumerate() {
            assert!((700..=1300).contains(&n), "octant {i} has {n} samples");
        }
    }

    #[test]
    fn test_shell_samples_within_radii() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let bounds = FieldBounds::shell(150.0, 90.0);
        for _ in 0..10_000 {
            let p = bounds.sample(&mut rng);
            let r = p.length();
            assert!((149.99..=240.01).contains(&r), "radius {r}");
            assert!(bounds.contains(p));
        }
    }

    #[test]
    fn test_shell_accepts_swapped_radii() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let bounds = FieldBounds::Shell {
            inner: 20.0,
            outer: 10.0,
        };
        for _ in 0..1000 {
            let r = bounds.sample(&mut rng).length();
            assert!((9.99..=20.01).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn test_shell_has_no_polar_clustering() {
        // Uniform solid angle means sin(latitude) = y / r is uniform in [-1, 1].
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let bounds = FieldBounds::shell(1.0, 0.5);
        const BINS: usize = 10;
        const SAMPLES: usize = 20_000;
        let mut hist = [0usize; BINS];
        for _ in 0..SAMPLES {
            let p = bounds.sample(&mut rng);
            let s = (p.y / p.length()).clamp(-1.0, 1.0);
            let bin = (((s + 1.0) * 0.5 * BINS as f32) as usize).min(BINS - 1);
            hist[bin] += 1;
        }
        let expected = SAMPLES / BINS;
        for (i, &n) in hist.iter().enumerate() {
            assert!(
                n.abs_diff(expected) < 250,
                "latitude bin {i} holds {n}, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_shell_is_uniform_in_volume() {
        // Half the volume of a 0..R ball lies beyond R / cbrt(2).
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let bounds = FieldBounds::Shell {
            inner: 0.0,
            outer: 1.0,
        };
        let split = 0.5_f32.cbrt();
        let outer_half = (0..10_000)
            .filter(|_| bounds.sample(&mut rng).length() > split)
            .count();
        assert!((4700..=5300).contains(&outer_half), "outer half holds {outer_half}");
    }
}
