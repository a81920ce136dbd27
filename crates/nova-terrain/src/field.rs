//! Trigonometric octave terrain: a sum of sine/cosine waves over the sphere
//! plus a polar bias term.

use glam::Vec3;

/// A scalar field sampled by unit direction.
///
/// Implementations must be pure: no hidden state, no randomness, and the same
/// input must produce a bit-identical result on every call.
pub trait TerrainField {
    /// Sample the field at `direction`, which the caller has normalized.
    fn sample(&self, direction: Vec3) -> f32;
}

impl<F> TerrainField for F
where
    F: Fn(Vec3) -> f32,
{
    fn sample(&self, direction: Vec3) -> f32 {
        self(direction)
    }
}

/// Periodic function used by an [`Octave`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    #[inline]
    fn eval(self, x: f32) -> f32 {
        match self {
            Wave::Sin => x.sin(),
            Wave::Cos => x.cos(),
        }
    }
}

/// One frequency/amplitude term of the composite field.
///
/// Evaluates to `amplitude * wave(frequency * dot(axes, direction) + phase)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    /// Linear combination of the direction's components fed into the wave.
    pub axes: Vec3,
    /// Spatial frequency multiplier.
    pub frequency: f32,
    /// Weight of this octave in the sum.
    pub amplitude: f32,
    /// Phase offset in radians.
    pub phase: f32,
    pub wave: Wave,
}

impl Octave {
    #[inline]
    pub fn eval(&self, direction: Vec3) -> f32 {
        self.amplitude * self.wave.eval(self.frequency * self.axes.dot(direction) + self.phase)
    }
}

/// Parameters for [`TrigTerrain`].
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Octaves summed without normalization, usually ordered from low to
    /// high frequency with falling amplitude.
    pub octaves: Vec<Octave>,
    /// Weight of the `|y|^polar_exponent` term. Positive values push the
    /// poles toward the high classification.
    pub polar_weight: f32,
    /// Exponent of the polar term.
    pub polar_exponent: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            octaves: vec![
                Octave {
                    axes: Vec3::new(1.0, 0.35, 0.8),
                    frequency: 1.7,
                    amplitude: 0.55,
                    phase: 0.3,
                    wave: Wave::Sin,
                },
                Octave {
                    axes: Vec3::new(-0.4, 0.9, 0.6),
                    frequency: 3.1,
                    amplitude: 0.3,
                    phase: 1.1,
                    wave: Wave::Cos,
                },
                Octave {
                    axes: Vec3::new(0.7, -0.5, 1.0),
                    frequency: 6.3,
                    amplitude: 0.15,
                    phase: 2.4,
                    wave: Wave::Sin,
                },
                Octave {
                    axes: Vec3::new(0.2, 0.8, -0.9),
                    frequency: 12.7,
                    amplitude: 0.07,
                    phase: 0.7,
                    wave: Wave::Cos,
                },
            ],
            polar_weight: 0.35,
            polar_exponent: 1.5,
        }
    }
}

/// Sum-of-octaves terrain field with a polar bias.
#[derive(Clone, Debug, Default)]
pub struct TrigTerrain {
    params: TerrainParams,
}

impl TrigTerrain {
    pub fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Upper bound of `|sample|` for unit input: the sum of absolute octave
    /// amplitudes plus the polar weight.
    pub fn max_amplitude(&self) -> f32 {
        self.params
            .octaves
            .iter()
            .map(|o| o.amplitude.abs())
            .sum::<f32>()
            + self.params.polar_weight.abs()
    }

    #[inline]
    fn polar(&self, direction: Vec3) -> f32 {
        if self.params.polar_weight == 0.0 {
            return 0.0;
        }
        self.params.polar_weight * direction.y.abs().powf(self.params.polar_exponent)
    }
}

impl TerrainField for TrigTerrain {
    fn sample(&self, direction: Vec3) -> f32 {
        let waves: f32 = self.params.octaves.iter().map(|o| o.eval(direction)).sum();
        waves + self.polar(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Roughly even directions over the sphere (Fibonacci lattice).
    fn fibonacci_directions(n: usize) -> Vec<Vec3> {
        let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        (0..n)
            .map(|i| {
                let y = 1.0 - 2.0 * (i as f32 + 0.5) / n as f32;
                let r = (1.0 - y * y).sqrt();
                let theta = golden * i as f32;
                Vec3::new(r * theta.cos(), y, r * theta.sin())
            })
            .collect()
    }

    #[test]
    fn test_sample_is_finite_everywhere() {
        let terrain = TrigTerrain::default();
        for d in fibonacci_directions(4096) {
            let v = terrain.sample(d);
            assert!(v.is_finite(), "non-finite sample {v} at {d}");
        }
    }

    #[test]
    fn test_sample_is_bit_identical_across_calls() {
        let terrain = TrigTerrain::default();
        let other = TrigTerrain::default();
        for d in fibonacci_directions(1024) {
            let a = terrain.sample(d);
            let b = terrain.sample(d);
            let c = other.sample(d);
            assert_eq!(a.to_bits(), b.to_bits());
            assert_eq!(a.to_bits(), c.to_bits());
        }
    }

    #[test]
    fn test_sample_within_amplitude_bound() {
        let terrain = TrigTerrain::default();
        let bound = terrain.max_amplitude() + 1e-5;
        for d in fibonacci_directions(4096) {
            let v = terrain.sample(d);
            assert!(v.abs() <= bound, "sample {v} exceeds bound {bound}");
        }
    }

    #[test]
    fn test_empty_params_yield_zero() {
        let terrain = TrigTerrain::new(TerrainParams {
            octaves: Vec::new(),
            polar_weight: 0.0,
            polar_exponent: 1.5,
        });
        assert_eq!(terrain.sample(Vec3::X), 0.0);
        assert_eq!(terrain.sample(Vec3::NEG_Y), 0.0);
    }

    #[test]
    fn test_polar_term_biases_poles() {
        let terrain = TrigTerrain::new(TerrainParams {
            octaves: Vec::new(),
            polar_weight: 0.5,
            polar_exponent: 1.5,
        });
        assert!((terrain.sample(Vec3::Y) - 0.5).abs() < 1e-6);
        assert!((terrain.sample(Vec3::NEG_Y) - 0.5).abs() < 1e-6);
        assert_eq!(terrain.sample(Vec3::Z), 0.0);

        let mid = Vec3::new(0.0, 0.5, 0.75_f32.sqrt());
        let expected = 0.5 * 0.5_f32.powf(1.5);
        assert!((terrain.sample(mid) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_single_octave_matches_formula() {
        let octave = Octave {
            axes: Vec3::new(1.0, 2.0, -1.0),
            frequency: 2.0,
            amplitude: 0.25,
            phase: 0.5,
            wave: Wave::Cos,
        };
        let terrain = TrigTerrain::new(TerrainParams {
            octaves: vec![octave],
            polar_weight: 0.0,
            polar_exponent: 1.5,
        });
        let d = Vec3::new(0.6, 0.0, 0.8);
        let expected = 0.25 * (2.0 * (0.6 - 0.8) + 0.5_f32).cos();
        assert!((terrain.sample(d) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_default_field_has_both_classes_at_default_threshold() {
        let terrain = TrigTerrain::default();
        let dirs = fibonacci_directions(4096);
        let high = dirs.iter().filter(|d| terrain.sample(**d) > 0.4).count();
        assert!(high > 200, "too little land: {high}");
        assert!(high < 3900, "too little sea: {}", 4096 - high);
    }

    #[test]
    fn test_closure_is_a_field() {
        let flat = |_: Vec3| 0.55_f32;
        assert_eq!(flat.sample(Vec3::X), 0.55);
    }
}
