//! Geometry primitives for the viewer.
//!
//! Meshes are indexed (shared vertices, triangle index triples) because the
//! edge-overlay pass needs to know which triangles share an edge. Face
//! normals are derived, not stored.

use nalgebra::{Point3, Vector3};

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    pub fn add_position(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.positions.push(Point3::new(x, y, z));
        (self.positions.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!((a as usize) < self.positions.len());
        debug_assert!((b as usize) < self.positions.len());
        debug_assert!((c as usize) < self.positions.len());
        self.triangles.push([a, b, c]);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Face normal of triangle `index`. Degenerate triangles yield a zero
    /// vector rather than NaN.
    pub fn face_normal(&self, index: usize) -> Vector3<f32> {
        let [a, b, c] = self.triangles[index];
        let p0 = self.positions[a as usize];
        let p1 = self.positions[b as usize];
        let p2 = self.positions[c as usize];
        let n = (p1 - p0).cross(&(p2 - p0));
        let len = n.norm();
        if len <= f32::EPSILON {
            Vector3::zeros()
        } else {
            n / len
        }
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions[1..] {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some((min, max))
    }

    /// Axis-aligned cube centered on the origin.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);
        for &z in &[-h, h] {
            for &y in &[-h, h] {
                for &x in &[-h, h] {
                    mesh.add_position(x, y, z);
                }
            }
        }
        // Vertex layout: bit 0 = +x, bit 1 = +y, bit 2 = +z.
        const FACES: [[u32; 4]; 6] = [
            [1, 3, 7, 5], // +x
            [0, 4, 6, 2], // -x
            [2, 6, 7, 3], // +y
            [0, 1, 5, 4], // -y
            [4, 5, 7, 6], // +z
            [0, 2, 3, 1], // -z
        ];
        for [a, b, c, d] in FACES {
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
        mesh
    }

    /// Flat square in the XZ plane, centered on the origin.
    pub fn plane(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(4, 2);
        let a = mesh.add_position(-h, 0.0, -h);
        let b = mesh.add_position(h, 0.0, -h);
        let c = mesh.add_position(h, 0.0, h);
        let d = mesh.add_position(-h, 0.0, h);
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_expected_counts() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.triangles.len(), 12);
    }

    #[test]
    fn cube_bounds_are_symmetric() {
        let cube = Mesh::cube(2.0);
        let (min, max) = cube.bounds().unwrap();
        assert_eq!(min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn cube_face_normals_are_axis_aligned_and_outward() {
        let cube = Mesh::cube(1.0);
        for i in 0..cube.triangles.len() {
            let n = cube.face_normal(i);
            assert!((n.norm() - 1.0).abs() < 1e-6);
            // Each face normal points away from the cube center.
            let [a, b, c] = cube.triangles[i];
            let centroid = (cube.positions[a as usize].coords
                + cube.positions[b as usize].coords
                + cube.positions[c as usize].coords)
                / 3.0;
            assert!(n.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn plane_is_flat() {
        let plane = Mesh::plane(1.0);
        assert_eq!(plane.triangles.len(), 2);
        for i in 0..2 {
            let n = plane.face_normal(i);
            assert!((n.y.abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let mut mesh = Mesh::new();
        let a = mesh.add_position(0.0, 0.0, 0.0);
        let b = mesh.add_position(1.0, 0.0, 0.0);
        mesh.add_triangle(a, b, a);
        assert_eq!(mesh.face_normal(0), Vector3::zeros());
    }
}
