//! Smooth vertex normal recomputation.

use glam::Vec3;

/// Recompute per-vertex normals from a triangle list.
///
/// Each vertex normal is the normalized sum of the (area-weighted) normals of
/// the faces that reference it. Vertices referenced by no face, or whose
/// faces cancel out, fall back to their radial direction.
pub fn recompute_normals(positions: &[Vec3], indices: &[u32], normals: &mut [Vec3]) {
    normals.iter_mut().for_each(|n| *n = Vec3::ZERO);

    let len = positions.len().min(normals.len());
    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if ia >= len || ib >= len || ic >= len {
            continue;
        }
        let (a, b, c) = (positions[ia], positions[ib], positions[ic]);
        let face = (c - b).cross(a - b);
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }

    for (n, p) in normals.iter_mut().zip(positions) {
        *n = n
            .try_normalize()
            .unwrap_or_else(|| p.normalize_or_zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SurfaceMesh;

    #[test]
    fn test_sphere_normals_point_outward() {
        let mut mesh = SurfaceMesh::uv_sphere(2.0, 48, 24);
        recompute_normals(&mesh.positions, &mesh.indices, &mut mesh.normals);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(
                n.dot(p.normalize()) > 0.95,
                "normal {n} deviates from radial {p}"
            );
        }
    }

    #[test]
    fn test_single_triangle_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut normals = [Vec3::ZERO; 3];
        // (c - b) x (a - b) with a=0, b=X, c=Y is +Z.
        recompute_normals(&positions, &[0, 1, 2], &mut normals);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_falls_back_to_radial() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(0.0, 0.0, -3.0)];
        let mut normals = [Vec3::ONE; 4];
        recompute_normals(&positions, &[0, 1, 2], &mut normals);
        assert!((normals[3] - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_out_of_range_indices_ignored() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut normals = [Vec3::ZERO; 3];
        recompute_normals(&positions, &[0, 1, 2, 0, 1, 9], &mut normals);
        assert!((normals[0] - Vec3::Z).length() < 1e-6);
    }
}
