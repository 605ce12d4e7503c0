//! Centroid candidate sampling, one point per triangle.
use glam::Vec3;

use crate::sampling::{decimate, SurfaceSampling};
use crate::surface::{SurfaceDescriptor, SurfacePoint};

/// Emits one candidate at each triangle centroid.
///
/// The sparse counterpart to [`crate::sampling::BarycentricGridSampling`];
/// suited to dense meshes where per-triangle lattices would over-sample.
#[derive(Debug, Clone, Default)]
pub struct TriangleCentroidSampling;

impl SurfaceSampling for TriangleCentroidSampling {
    fn generate(&self, surface: &SurfaceDescriptor, density: f32) -> Vec<SurfacePoint> {
        let bary = Vec3::splat(1.0 / 3.0);
        let points = (0..surface.triangle_count())
            .map(|triangle| SurfacePoint {
                index: triangle,
                position: surface.position_at(triangle, bary),
                normal: surface.face_normal(triangle),
                uv: surface.uv_at(triangle, bary),
            })
            .collect();
        decimate(points, density)
    }
}
