//! Built-in scene layouts.

use glam::Vec3;
use nova_space::FixedInstance;

/// One planet of the hand-placed ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingPlanet {
    pub position: [f32; 3],
    pub size: f32,
    /// `0xRRGGBB`.
    pub color: u32,
    /// Glows with its own color at the ring's emissive intensity.
    pub glowing: bool,
}

const fn planet(position: [f32; 3], size: f32, color: u32, glowing: bool) -> RingPlanet {
    RingPlanet {
        position,
        size,
        color,
        glowing,
    }
}

/// Three rows of three: front, middle and back of the planet.
pub const RING_PLANETS: [RingPlanet; 9] = [
    planet([-10.0, 6.0, 8.0], 1.5, 0xff6b6b, false),
    planet([0.0, -8.0, 9.0], 1.8, 0x4ecdc4, true),
    planet([12.0, 4.0, 7.0], 1.2, 0xffe66d, false),
    planet([-18.0, 0.0, 0.0], 1.6, 0xa8e6cf, false),
    planet([-15.0, 10.0, -2.0], 1.3, 0xff9ff3, true),
    planet([20.0, -5.0, 1.0], 1.4, 0xffd6a5, false),
    planet([-8.0, -6.0, -10.0], 1.7, 0x9bf6ff, false),
    planet([10.0, 8.0, -9.0], 1.1, 0xbdb2ff, true),
    planet([0.0, -10.0, -11.0], 1.5, 0xcaffbf, false),
];

/// `0xRRGGBB` to sRGB components in `[0, 1]`.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

impl RingPlanet {
    pub fn to_fixed(&self, emissive_intensity: f32) -> FixedInstance {
        FixedInstance {
            position: Vec3::from_array(self.position),
            size: self.size,
            color: rgb(self.color),
            emissive: if self.glowing { emissive_intensity } else { 0.0 },
        }
    }
}

/// The ring as fixed instances in declaration order.
pub fn ring_layout(emissive_intensity: f32) -> Vec<FixedInstance> {
    RING_PLANETS
        .iter()
        .map(|p| p.to_fixed(emissive_intensity))
        .collect()
}
