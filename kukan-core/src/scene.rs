//! Owned scene graph for one viewport.
//!
//! Nodes are a closed set: the flat-shaded surface mesh, its wireframe
//! overlay, and label sprites. Hosts iterate the nodes and draw; all
//! mutation goes through the synchronizer.

use crate::edges::EdgeCylinder;
use crate::geometry::Mesh;
use crate::label::LabelSprite;
use crate::registry::{Color, ThemeSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Flat-shaded surface, painted the theme's dark color.
    Surface { mesh: Mesh, color: Color },
    /// Thickened feature edges, painted the theme's light color. The
    /// radius is shared by every cylinder so a resize touches one value.
    Wireframe {
        cylinders: Vec<EdgeCylinder>,
        color: Color,
        radius: f32,
    },
    Label(LabelSprite),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Color,
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelSprite> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Label(sprite) => Some(sprite),
            _ => None,
        })
    }

    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Drop every label sprite, returning how many were removed.
    pub fn remove_labels(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes
            .retain(|node| !matches!(node, SceneNode::Label(_)));
        before - self.nodes.len()
    }

    pub fn has_surface(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, SceneNode::Surface { .. }))
    }

    /// Repaint background, surface and wireframe from a palette. Labels
    /// carry their color in their rasterized bitmap, so the caller
    /// rebuilds them instead.
    pub fn recolor(&mut self, palette: &ThemeSpec) {
        self.background = palette.dark;
        for node in &mut self.nodes {
            match node {
                SceneNode::Surface { color, .. } => *color = palette.dark,
                SceneNode::Wireframe { color, .. } => *color = palette.light,
                SceneNode::Label(_) => {}
            }
        }
    }

    /// Update the shared wireframe cylinder radius.
    pub fn set_wireframe_radius(&mut self, new_radius: f32) {
        for node in &mut self.nodes {
            if let SceneNode::Wireframe { radius, .. } = node {
                *radius = new_radius;
            }
        }
    }
}
