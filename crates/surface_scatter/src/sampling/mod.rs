//! Candidate generation over mesh surfaces.
//!
//! This module defines the trait and concrete strategies used by the
//! placement pipeline to enumerate candidate points on a surface prior to
//! color matching. Generation is fully deterministic: identical surface and
//! density always yield the identical candidate sequence, which is what lets
//! the seeded randomization downstream reproduce runs exactly.
pub mod barycentric_grid;
pub mod triangle_centroid;

pub use barycentric_grid::BarycentricGridSampling;
pub use triangle_centroid::TriangleCentroidSampling;

use crate::surface::{SurfaceDescriptor, SurfacePoint};

/// Trait for surface candidate sampling.
///
/// Density is the fraction of the strategy's maximum candidate grid actually
/// emitted: 0 produces no candidates, 1 the full grid.
pub trait SurfaceSampling: Send + Sync {
    fn generate(&self, surface: &SurfaceDescriptor, density: f32) -> Vec<SurfacePoint>;
}

/// Keeps a `density` fraction of the points, spread evenly over the input
/// order, and reindexes the survivors to a contiguous `0..n` sequence.
///
/// The stride rule keeps point `i` exactly when `floor((i + 1) * d)` exceeds
/// `floor(i * d)`, so the kept count is `floor(len * d)` and the selection is
/// stable for a given length and density.
pub(crate) fn decimate(points: Vec<SurfacePoint>, density: f32) -> Vec<SurfacePoint> {
    let density = if density.is_finite() {
        density.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if density <= 0.0 {
        return Vec::new();
    }
    if density >= 1.0 {
        return points;
    }

    let d = density as f64;
    let mut kept = Vec::with_capacity((points.len() as f64 * d).ceil() as usize);
    for (i, mut point) in points.into_iter().enumerate() {
        let before = (i as f64 * d).floor();
        let after = ((i as f64 + 1.0) * d).floor();
        if after > before {
            point.index = kept.len();
            kept.push(point);
        }
    }
    kept
}
