//! Barycentric-grid candidate sampling.
use glam::Vec3;

use crate::sampling::{decimate, SurfaceSampling};
use crate::surface::{SurfaceDescriptor, SurfacePoint};

/// Regular barycentric lattice per triangle.
///
/// Each triangle contributes `resolution * (resolution + 1) / 2` interior
/// points at full density, walked triangle-by-triangle in index order. The
/// lattice point `(i, j)` maps to barycentric weights built from
/// `(i + 1/3) / resolution` and `(j + 1/3) / resolution`, which keeps every
/// point strictly inside the triangle; `resolution = 1` degenerates to the
/// centroid.
#[derive(Debug, Clone)]
pub struct BarycentricGridSampling {
    /// Lattice rows per triangle edge.
    pub resolution: usize,
}

impl BarycentricGridSampling {
    /// Create a new sampling with the given per-triangle resolution
    /// (clamped to at least 1).
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution: resolution.max(1),
        }
    }

    /// Candidate count at full density for the given surface.
    pub fn max_candidates(&self, surface: &SurfaceDescriptor) -> usize {
        surface.triangle_count() * self.resolution * (self.resolution + 1) / 2
    }
}

impl Default for BarycentricGridSampling {
    fn default() -> Self {
        Self::new(8)
    }
}

impl SurfaceSampling for BarycentricGridSampling {
    fn generate(&self, surface: &SurfaceDescriptor, density: f32) -> Vec<SurfacePoint> {
        let res = self.resolution;
        let mut points = Vec::with_capacity(self.max_candidates(surface));

        for triangle in 0..surface.triangle_count() {
            let normal = surface.face_normal(triangle);
            for i in 0..res {
                for j in 0..res - i {
                    let u = (i as f32 + 1.0 / 3.0) / res as f32;
                    let v = (j as f32 + 1.0 / 3.0) / res as f32;
                    let bary = Vec3::new(1.0 - u - v, u, v);
                    points.push(SurfacePoint {
                        index: points.len(),
                        position: surface.position_at(triangle, bary),
                        normal,
                        uv: surface.uv_at(triangle, bary),
                    });
                }
            }
        }

        decimate(points, density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_clamped_to_one() {
        let sampling = BarycentricGridSampling::new(0);
        assert_eq!(sampling.resolution, 1);
    }

    #[test]
    fn resolution_one_emits_one_centroid_per_triangle() {
        let quad = SurfaceDescriptor::unit_quad();
        let sampling = BarycentricGridSampling::new(1);
        let points = sampling.generate(&quad, 1.0);
        assert_eq!(points.len(), 2);
        for point in &points {
            assert_eq!(point.position.y, 0.0);
            assert_eq!(point.normal, Vec3::Y);
        }
    }

    #[test]
    fn full_density_matches_max_candidates() {
        let quad = SurfaceDescriptor::unit_quad();
        let sampling = BarycentricGridSampling::new(4);
        assert_eq!(sampling.max_candidates(&quad), 2 * 10);
        assert_eq!(sampling.generate(&quad, 1.0).len(), 20);
    }

    #[test]
    fn zero_density_emits_no_candidates() {
        let quad = SurfaceDescriptor::unit_quad();
        let sampling = BarycentricGridSampling::new(4);
        assert!(sampling.generate(&quad, 0.0).is_empty());
    }

    #[test]
    fn candidates_stay_inside_the_quad() {
        let quad = SurfaceDescriptor::unit_quad();
        let sampling = BarycentricGridSampling::new(6);
        for point in sampling.generate(&quad, 1.0) {
            assert!(point.position.x > 0.0 && point.position.x < 1.0);
            assert!(point.position.z > 0.0 && point.position.z < 1.0);
            assert!(point.uv.x > 0.0 && point.uv.x < 1.0);
            assert!(point.uv.y > 0.0 && point.uv.y < 1.0);
        }
    }

    #[test]
    fn generation_is_deterministic_and_indexed_in_order() {
        let quad = SurfaceDescriptor::unit_quad();
        let sampling = BarycentricGridSampling::new(5);

        let first = sampling.generate(&quad, 0.5);
        let second = sampling.generate(&quad, 0.5);
        assert_eq!(first, second);

        let indices: Vec<_> = first.iter().map(|p| p.index).collect();
        assert_eq!(indices, (0..first.len()).collect::<Vec<_>>());
    }
}
