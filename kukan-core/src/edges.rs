//! Feature-edge extraction for the wireframe pass.
//!
//! An edge of the surface mesh is rendered when it borders exactly one
//! triangle or when the two bordering triangles meet at more than the
//! threshold angle. Each kept edge becomes a thin cylinder aligned with
//! the segment, so the wireframe holds its weight at any zoom level.

use std::collections::BTreeMap;

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::geometry::Mesh;

/// Default crease threshold in degrees. Coplanar interior edges such
/// as the fan diagonals of a flat polygon fall below it and disappear.
pub const DEFAULT_FEATURE_ANGLE_DEG: f32 = 1.0;

/// Edge cylinder radius on narrow viewports.
pub const THICK_EDGE_RADIUS: f32 = 0.006;
/// Edge cylinder radius on wide viewports.
pub const THIN_EDGE_RADIUS: f32 = 0.003;
/// Viewport width at or below which the thicker radius applies.
pub const NARROW_VIEW_WIDTH: f32 = 768.0;

/// Radius of the edge cylinders for a given viewport width in pixels.
pub fn edge_radius_for_width(view_width: f32) -> f32 {
    if view_width <= NARROW_VIEW_WIDTH {
        THICK_EDGE_RADIUS
    } else {
        THIN_EDGE_RADIUS
    }
}

/// A surface edge kept by the crease test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureEdge {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl FeatureEdge {
    pub fn length(&self) -> f32 {
        (self.end - self.start).norm()
    }

    /// Placement of a unit Y-aligned cylinder over this edge.
    pub fn cylinder(&self) -> EdgeCylinder {
        let direction = self.end - self.start;
        let length = direction.norm();
        let rotation =
            UnitQuaternion::rotation_between(&Vector3::y(), &direction).unwrap_or_else(|| {
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI)
            });
        EdgeCylinder {
            center: nalgebra::center(&self.start, &self.end),
            rotation,
            length,
        }
    }
}

/// Transform for one wireframe cylinder. The shared radius lives with
/// the scene node so a viewport resize only touches a single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCylinder {
    pub center: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub length: f32,
}

/// Extract the edges that survive the crease test at `angle_deg`.
pub fn feature_edges(mesh: &Mesh, angle_deg: f32) -> Vec<FeatureEdge> {
    let threshold = angle_deg.to_radians();
    // Undirected edge -> bordering triangle indices, keyed on the sorted
    // vertex pair so both windings land in the same slot. BTreeMap keeps
    // the output order stable across runs.
    let mut borders: BTreeMap<(u32, u32), Vec<usize>> = BTreeMap::new();
    for (face, tri) in mesh.triangles.iter().enumerate() {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            borders.entry(key).or_default().push(face);
        }
    }

    let mut edges = Vec::new();
    for ((a, b), faces) in &borders {
        let keep = match faces.as_slice() {
            [f0, f1] => crease_angle(mesh, *f0, *f1) > threshold,
            // Boundary and non-manifold edges always show.
            _ => true,
        };
        if keep {
            let start = mesh.positions[*a as usize];
            let end = mesh.positions[*b as usize];
            if start != end {
                edges.push(FeatureEdge { start, end });
            }
        }
    }
    edges
}

/// Feature edges converted straight to cylinder placements.
pub fn edge_cylinders(mesh: &Mesh, angle_deg: f32) -> Vec<EdgeCylinder> {
    feature_edges(mesh, angle_deg)
        .iter()
        .map(FeatureEdge::cylinder)
        .collect()
}

fn crease_angle(mesh: &Mesh, face_a: usize, face_b: usize) -> f32 {
    let na = mesh.face_normal(face_a);
    let nb = mesh.face_normal(face_b);
    if na.norm_squared() == 0.0 || nb.norm_squared() == 0.0 {
        // Degenerate triangles never hide an edge.
        return std::f32::consts::PI;
    }
    na.normalize().dot(&nb.normalize()).clamp(-1.0, 1.0).acos()
}
