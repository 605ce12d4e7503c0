//! Surface geometry: indexed triangle meshes with UVs.
//!
//! A [`SurfaceDescriptor`] is the immutable per-run view of the target mesh.
//! Candidate generation maps barycentric coordinates on its triangles back to
//! world positions and UVs, and derives per-face normals from winding.
use glam::{Vec2, Vec3};

use crate::error::{Error, Result};

/// Indexed triangle mesh with one UV per vertex. Immutable for the duration
/// of a placement run.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct SurfaceDescriptor {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
}

impl SurfaceDescriptor {
    pub fn new(positions: Vec<Vec3>, uvs: Vec<Vec2>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            uvs,
            triangles,
        }
    }

    /// Two-triangle quad spanning `[0, 1]` in the XZ plane, UVs matching XZ,
    /// face normals pointing up. Useful as a fixture in tests and examples.
    pub fn unit_quad() -> Self {
        Self {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            triangles: vec![[0, 2, 1], [0, 3, 2]],
        }
    }

    /// Validates the mesh, returning an error if it cannot be sampled.
    pub fn validate(&self) -> Result<()> {
        if self.triangles.is_empty() {
            return Err(Error::InvalidSurface("mesh has no triangles".into()));
        }
        if self.uvs.len() != self.positions.len() {
            return Err(Error::InvalidSurface(format!(
                "uv count {} does not match vertex count {}",
                self.uvs.len(),
                self.positions.len()
            )));
        }
        let vertex_count = self.positions.len() as u32;
        for (i, tri) in self.triangles.iter().enumerate() {
            if tri.iter().any(|&idx| idx >= vertex_count) {
                return Err(Error::InvalidSurface(format!(
                    "triangle {i} references a vertex out of bounds"
                )));
            }
        }
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn corners(&self, triangle: usize) -> (usize, usize, usize) {
        let [a, b, c] = self.triangles[triangle];
        (a as usize, b as usize, c as usize)
    }

    /// Face normal of the triangle, derived from counter-clockwise winding.
    /// Degenerate triangles fall back to `Vec3::Y`.
    pub fn face_normal(&self, triangle: usize) -> Vec3 {
        let (a, b, c) = self.corners(triangle);
        let edge1 = self.positions[b] - self.positions[a];
        let edge2 = self.positions[c] - self.positions[a];
        let cross = edge1.cross(edge2);
        if cross.length_squared() > f32::EPSILON {
            cross.normalize()
        } else {
            Vec3::Y
        }
    }

    /// World position at barycentric weights `(w0, w1, w2)` on the triangle.
    pub fn position_at(&self, triangle: usize, bary: Vec3) -> Vec3 {
        let (a, b, c) = self.corners(triangle);
        self.positions[a] * bary.x + self.positions[b] * bary.y + self.positions[c] * bary.z
    }

    /// UV coordinate at barycentric weights `(w0, w1, w2)` on the triangle.
    pub fn uv_at(&self, triangle: usize, bary: Vec3) -> Vec2 {
        let (a, b, c) = self.corners(triangle);
        self.uvs[a] * bary.x + self.uvs[b] * bary.y + self.uvs[c] * bary.z
    }
}

/// A candidate point on the surface, carrying its stable candidate index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    /// Index in the candidate sequence, stable across identical runs.
    pub index: usize,
    /// World position on the surface.
    pub position: Vec3,
    /// Surface normal at the point.
    pub normal: Vec3,
    /// UV coordinate used for texture sampling.
    pub uv: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_quad_is_valid() {
        let quad = SurfaceDescriptor::unit_quad();
        assert!(quad.validate().is_ok());
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn validate_rejects_empty_mesh() {
        let surface = SurfaceDescriptor::new(Vec::new(), Vec::new(), Vec::new());
        assert!(matches!(
            surface.validate(),
            Err(Error::InvalidSurface(_))
        ));
    }

    #[test]
    fn validate_rejects_out_of_bounds_index() {
        let surface = SurfaceDescriptor::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            vec![[0, 1, 3]],
        );
        assert!(surface.validate().is_err());
    }

    #[test]
    fn validate_rejects_uv_count_mismatch() {
        let surface = SurfaceDescriptor::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            vec![Vec2::ZERO, Vec2::X],
            vec![[0, 1, 2]],
        );
        assert!(surface.validate().is_err());
    }

    #[test]
    fn unit_quad_normals_point_up() {
        let quad = SurfaceDescriptor::unit_quad();
        assert!(quad.face_normal(0).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(quad.face_normal(1).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn degenerate_triangle_normal_falls_back_to_up() {
        let surface = SurfaceDescriptor::new(
            vec![Vec3::ZERO, Vec3::ZERO, Vec3::ZERO],
            vec![Vec2::ZERO, Vec2::ZERO, Vec2::ZERO],
            vec![[0, 1, 2]],
        );
        assert_eq!(surface.face_normal(0), Vec3::Y);
    }

    #[test]
    fn barycentric_interpolation_hits_corners_and_center() {
        let quad = SurfaceDescriptor::unit_quad();

        let corner = quad.position_at(0, Vec3::new(1.0, 0.0, 0.0));
        assert!(corner.abs_diff_eq(Vec3::new(0.0, 0.0, 0.0), 1e-6));

        let centroid = quad.position_at(0, Vec3::splat(1.0 / 3.0));
        let expected = (Vec3::new(0.0, 0.0, 0.0)
            + Vec3::new(1.0, 0.0, 1.0)
            + Vec3::new(1.0, 0.0, 0.0))
            / 3.0;
        assert!(centroid.abs_diff_eq(expected, 1e-6));

        let uv = quad.uv_at(0, Vec3::splat(1.0 / 3.0));
        assert!(uv.abs_diff_eq(Vec2::new(2.0 / 3.0, 1.0 / 3.0), 1e-6));
    }
}
