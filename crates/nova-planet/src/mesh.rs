//! CPU-side sphere mesh and the buffer interface the surface builder writes to.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Upper bound on either sphere segment count. Keeps every vertex index of
/// the largest sphere inside `u32`.
pub const MAX_SEGMENTS: u32 = 4096;

fn segment_counts(width_segments: u32, height_segments: u32) -> (u32, u32) {
    (
        width_segments.clamp(3, MAX_SEGMENTS),
        height_segments.clamp(2, MAX_SEGMENTS),
    )
}

/// Marks which vertex buffers changed and must be re-uploaded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirtyFlags(pub u8);

impl DirtyFlags {
    pub const NONE: Self = Self(0);
    pub const POSITIONS: Self = Self(1 << 0);
    pub const NORMALS: Self = Self(1 << 1);
    pub const COLORS: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::POSITIONS.0 | Self::NORMALS.0 | Self::COLORS.0);

    /// Returns true if `self` contains all bits in `other`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for DirtyFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DirtyFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Mutable views over a host mesh's vertex buffers.
///
/// All per-vertex slices have the same length; `indices` is a triangle list.
pub struct MeshBuffersMut<'a> {
    pub positions: &'a mut [Vec3],
    pub normals: &'a mut [Vec3],
    pub colors: &'a mut [[f32; 3]],
    pub indices: &'a [u32],
}

/// A host-owned mesh the surface builder can write into.
pub trait SurfaceBuffers {
    /// Borrow the vertex buffers, or `None` if the host has not allocated
    /// them yet.
    fn buffers_mut(&mut self) -> Option<MeshBuffersMut<'_>>;

    /// Flag buffers for re-upload.
    fn mark_dirty(&mut self, flags: DirtyFlags);
}

/// Interleaved vertex layout for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// A fixed-topology sphere mesh held on the CPU.
///
/// Vertex count never changes after construction. The dirty flags accumulate
/// until the renderer calls [`SurfaceMesh::take_dirty`].
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    dirty: DirtyFlags,
}

impl SurfaceMesh {
    /// Build a latitude/longitude sphere of `radius` with the same topology as
    /// a classic `SphereGeometry`: `(width_segments + 1) * (height_segments + 1)`
    /// vertices, with the seam column and the pole rows duplicated.
    ///
    /// Segment counts are clamped to at least 3 around and 2 from pole to
    /// pole, and to at most [`MAX_SEGMENTS`] each.
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let (width_segments, height_segments) = segment_counts(width_segments, height_segments);
        let row_len = width_segments + 1;
        let vertex_count = row_len as usize * (height_segments as usize + 1);

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let (sin_phi, cos_phi) = (v * std::f32::consts::PI).sin_cos();
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let (sin_theta, cos_theta) = (u * std::f32::consts::TAU).sin_cos();
                let dir = Vec3::new(-cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);
                positions.push(dir * radius);
                normals.push(dir.normalize_or_zero());
            }
        }

        let mut indices = Vec::with_capacity(width_segments as usize * height_segments as usize * 6);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row_len + ix + 1;
                let b = iy * row_len + ix;
                let c = (iy + 1) * row_len + ix;
                let d = (iy + 1) * row_len + ix + 1;
                // The pole rows collapse one triangle of each quad.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            colors: vec![[1.0, 1.0, 1.0]; positions.len()],
            positions,
            normals,
            indices,
            dirty: DirtyFlags::ALL,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Currently pending dirty flags.
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Return and clear the pending dirty flags. Called by the renderer after
    /// it re-uploads the flagged buffers.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// Interleave positions, normals and colors for upload.
    pub fn interleaved(&self) -> Vec<SurfaceVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((p, n), c)| SurfaceVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: *c,
            })
            .collect()
    }

    /// Positions as raw bytes.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as raw bytes.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Indices as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl SurfaceBuffers for SurfaceMesh {
    fn buffers_mut(&mut self) -> Option<MeshBuffersMut<'_>> {
        Some(MeshBuffersMut {
            positions: &mut self.positions,
            normals: &mut self.normals,
            colors: &mut self.colors,
            indices: &self.indices,
        })
    }

    fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }
}
