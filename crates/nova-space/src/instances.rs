//! Host-side instance buffers and index-stable field upload.

use bytemuck::{Pod, Zeroable};
use tracing::debug;

use crate::field::{InstanceTransform, ParticleInstance};

/// Marks which instance attributes changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InstanceDirty(pub u8);

impl InstanceDirty {
    pub const NONE: Self = Self(0);
    pub const TRANSFORMS: Self = Self(1 << 0);
    pub const COLORS: Self = Self(1 << 1);

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for InstanceDirty {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for InstanceDirty {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Per-index write access to a host's instanced draw.
pub trait InstanceSink {
    /// Number of instance slots the host allocated.
    fn capacity(&self) -> usize;
    fn set_transform(&mut self, index: usize, transform: InstanceTransform);
    fn set_color(&mut self, index: usize, color: [f32; 3]);
    fn mark_dirty(&mut self, flags: InstanceDirty);
}

/// GPU instance data for one copy of the shared base geometry.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    /// Emissive intensity multiplier.
    pub emissive: f32,
}

/// CPU-side instance buffer of fixed capacity.
///
/// Slots start hidden (zero scale) with the shared color until a field is
/// written into them.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuffer {
    transforms: Vec<InstanceTransform>,
    raw: Vec<InstanceRaw>,
    dirty: InstanceDirty,
}

impl InstanceBuffer {
    pub fn new(capacity: usize, color: [f32; 3], emissive: f32) -> Self {
        let hidden = InstanceRaw {
            model: InstanceTransform::HIDDEN.to_matrix().to_cols_array_2d(),
            color,
            emissive,
        };
        Self {
            transforms: vec![InstanceTransform::HIDDEN; capacity],
            raw: vec![hidden; capacity],
            dirty: InstanceDirty::NONE,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn transform(&self, index: usize) -> Option<InstanceTransform> {
        self.transforms.get(index).copied()
    }

    pub fn color(&self, index: usize) -> Option<[f32; 3]> {
        self.raw.get(index).map(|r| r.color)
    }

    pub fn emissive(&self, index: usize) -> Option<f32> {
        self.raw.get(index).map(|r| r.emissive)
    }

    pub fn set_emissive(&mut self, index: usize, emissive: f32) {
        if let Some(r) = self.raw.get_mut(index) {
            r.emissive = emissive;
            self.dirty |= InstanceDirty::COLORS;
        }
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.raw
    }

    /// Instance data as raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.raw)
    }

    pub fn dirty(&self) -> InstanceDirty {
        self.dirty
    }

    /// Return and clear the pending dirty flags.
    pub fn take_dirty(&mut self) -> InstanceDirty {
        std::mem::take(&mut self.dirty)
    }
}

impl InstanceSink for InstanceBuffer {
    fn capacity(&self) -> usize {
        self.raw.len()
    }

    fn set_transform(&mut self, index: usize, transform: InstanceTransform) {
        let Some(raw) = self.raw.get_mut(index) else {
            debug!(index, capacity = self.transforms.len(), "instance index out of range");
            return;
        };
        raw.model = transform.to_matrix().to_cols_array_2d();
        self.transforms[index] = transform;
    }

    fn set_color(&mut self, index: usize, color: [f32; 3]) {
        match self.raw.get_mut(index) {
            Some(raw) => raw.color = color,
            None => debug!(index, "instance color index out of range"),
        }
    }

    fn mark_dirty(&mut self, flags: InstanceDirty) {
        self.dirty |= flags;
    }
}

/// Write `instances` into `sink`, instance `i` into slot `i`.
///
/// Instances beyond the sink's capacity are dropped. Returns the number of
/// instances written.
pub fn write_field<S>(sink: &mut S, instances: &[ParticleInstance]) -> usize
where
    S: InstanceSink + ?Sized,
{
    let capacity = sink.capacity();
    if instances.len() > capacity {
        debug!(
            generated = instances.len(),
            capacity, "instance sink too small, dropping the excess"
        );
    }

    let mut flags = InstanceDirty::TRANSFORMS;
    let mut written = 0;
    for (index, instance) in instances.iter().enumerate().take(capacity) {
        sink.set_transform(index, instance.transform);
        if let Some(color) = instance.color {
            sink.set_color(index, color);
            flags |= InstanceDirty::COLORS;
        }
        written += 1;
    }

    if written > 0 {
        sink.mark_dirty(flags);
    }
    written
}
