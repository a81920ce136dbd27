//! Hand-placed instance layouts.

use glam::Vec3;

use crate::field::{InstanceTransform, ParticleInstance};
use crate::instances::{InstanceBuffer, InstanceSink, write_field};

/// A single hand-placed instance, e.g. one planet of the orbit ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedInstance {
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 3],
    /// Emissive intensity; 0 for a purely lit body.
    pub emissive: f32,
}

impl FixedInstance {
    pub fn to_particle(&self) -> ParticleInstance {
        ParticleInstance {
            transform: InstanceTransform {
                position: self.position,
                scale: self.size,
            },
            color: Some(self.color),
        }
    }
}

/// Convert a fixed layout into particle instances, preserving order.
pub fn fixed_field(layout: &[FixedInstance]) -> Vec<ParticleInstance> {
    layout.iter().map(FixedInstance::to_particle).collect()
}

impl InstanceBuffer {
    /// Buffer holding exactly `layout`, with per-instance emissive intensity.
    pub fn from_fixed(layout: &[FixedInstance]) -> Self {
        let mut buffer = InstanceBuffer::new(layout.len(), [1.0; 3], 0.0);
        write_field(&mut buffer, &fixed_field(layout));
        for (index, instance) in layout.iter().enumerate() {
            buffer.set_emissive(index, instance.emissive);
        }
        buffer
    }
}
