//! Terrain-driven classification, coloring and radial displacement of a
//! sphere mesh.

use std::time::Instant;

use glam::Vec3;
use nova_terrain::TerrainField;
use tracing::{debug, info};

use crate::mesh::{DirtyFlags, SurfaceBuffers};
use crate::normals::recompute_normals;

/// Which side of the threshold a terrain value falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceClass {
    /// Above the threshold: raised and drawn with the land color.
    Land,
    /// At or below the threshold: drawn with the sea color.
    Sea,
}

/// Tunable surface look. Thresholds and offsets vary a lot between looks,
/// so none of them are hard-coded.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceStyle {
    /// Radius of the undisplaced sphere.
    pub base_radius: f32,
    /// Values strictly above this are land.
    pub threshold: f32,
    /// Land rises by `land_gain * (value - threshold)`.
    pub land_gain: f32,
    /// Sea sinks by this fixed amount.
    pub sea_offset: f32,
    pub land_color: [f32; 3],
    pub sea_color: [f32; 3],
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            base_radius: 4.0,
            threshold: 0.4,
            land_gain: 0.3,
            sea_offset: 0.0,
            land_color: [111.0 / 255.0, 207.0 / 255.0, 151.0 / 255.0],
            sea_color: [74.0 / 255.0, 163.0 / 255.0, 1.0],
        }
    }
}

impl SurfaceStyle {
    pub fn color(&self, class: SurfaceClass) -> [f32; 3] {
        match class {
            SurfaceClass::Land => self.land_color,
            SurfaceClass::Sea => self.sea_color,
        }
    }
}

/// Classify a terrain value. Monotonic: raising `value` can only move a
/// vertex from sea to land.
#[inline]
pub fn classify(value: f32, threshold: f32) -> SurfaceClass {
    if value > threshold {
        SurfaceClass::Land
    } else {
        SurfaceClass::Sea
    }
}

/// Displaced radius for a terrain value under `style`.
#[inline]
pub fn displaced_radius(value: f32, style: &SurfaceStyle) -> f32 {
    match classify(value, style.threshold) {
        SurfaceClass::Land => style.base_radius + style.land_gain * (value - style.threshold),
        SurfaceClass::Sea => style.base_radius - style.sea_offset,
    }
}

/// Why a build did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The mesh has no vertices.
    EmptyMesh,
    /// Position, normal and color buffers disagree in length.
    BufferMismatch,
}

/// Counters from a completed build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub vertices: usize,
    pub land: usize,
    pub sea: usize,
    /// Vertices left untouched because their direction or sample was unusable.
    pub skipped: usize,
}

/// Result of [`build_surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Buffers were rewritten and flagged dirty.
    Applied(BuildStats),
    /// The host has not allocated its buffers yet; try again on the next
    /// lifecycle signal.
    Deferred,
    /// Precondition failed; the mesh is left as it was.
    Skipped(SkipReason),
}

/// Classify, color and displace every vertex of `mesh` using `field`, then
/// recompute normals and flag all three buffers dirty.
///
/// Each vertex is projected along its own direction, so running the build
/// twice with the same inputs gives the same surface.
pub fn build_surface<M, F>(mesh: &mut M, field: &F, style: &SurfaceStyle) -> BuildOutcome
where
    M: SurfaceBuffers + ?Sized,
    F: TerrainField + ?Sized,
{
    let start = Instant::now();

    let stats = {
        let Some(buffers) = mesh.buffers_mut() else {
            debug!("surface buffers not allocated yet, deferring build");
            return BuildOutcome::Deferred;
        };

        let count = buffers.positions.len();
        if count == 0 {
            debug!("surface mesh has no vertices, skipping build");
            return BuildOutcome::Skipped(SkipReason::EmptyMesh);
        }
        if buffers.normals.len() != count || buffers.colors.len() != count {
            debug!(
                positions = count,
                normals = buffers.normals.len(),
                colors = buffers.colors.len(),
                "surface buffer lengths disagree, skipping build"
            );
            return BuildOutcome::Skipped(SkipReason::BufferMismatch);
        }

        let mut stats = BuildStats {
            vertices: count,
            ..Default::default()
        };

        for (position, color) in buffers.positions.iter_mut().zip(buffers.colors.iter_mut()) {
            let Some(direction) = position.try_normalize() else {
                stats.skipped += 1;
                continue;
            };
            let value = field.sample(direction);
            if !value.is_finite() {
                stats.skipped += 1;
                continue;
            }

            let class = classify(value, style.threshold);
            match class {
                SurfaceClass::Land => stats.land += 1,
                SurfaceClass::Sea => stats.sea += 1,
            }
            *color = style.color(class);
            *position = direction * displaced_radius(value, style);
        }

        recompute_normals(buffers.positions, buffers.indices, buffers.normals);
        stats
    };

    mesh.mark_dirty(DirtyFlags::ALL);

    if stats.skipped > 0 {
        debug!(
            skipped = stats.skipped,
            "vertices left undisplaced (zero-length position or non-finite terrain sample)"
        );
    }
    info!(
        vertices = stats.vertices,
        land = stats.land,
        sea = stats.sea,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "surface built"
    );

    BuildOutcome::Applied(stats)
}
