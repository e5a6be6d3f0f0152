/// ASCII rasterizer for the viewer's scenes
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use kukan_core::camera::OrthoCamera;
use kukan_core::edges::{EdgeCylinder, THICK_EDGE_RADIUS};
use kukan_core::geometry::Mesh;
use kukan_core::label::LabelSprite;
use kukan_core::scene::{Scene, SceneNode};
use nalgebra::{Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp (lightest to densest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Edges sit on the surface they outline; drawing them a hair closer
/// keeps them from losing the depth test against their own mesh.
const EDGE_DEPTH_BIAS: f32 = 0.01;

/// Glyph for a wireframe segment: the thick tier draws denser.
fn edge_character(radius: f32) -> char {
    if radius >= THICK_EDGE_RADIUS {
        LUMINOSITY_RAMP[7]
    } else {
        LUMINOSITY_RAMP[5]
    }
}

/// ASCII renderer that converts one viewport's scene to terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<(u8, u8, u8)>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![(0, 0, 0); size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = (0, 0, 0);
        }
    }

    /// Rasterize every node of a scene with its camera.
    pub fn render_scene(&mut self, scene: &Scene, camera: &OrthoCamera) {
        for node in scene.nodes() {
            match node {
                // The surface is painted the background color in the source
                // design, so its cells stay blank; it still fills the depth
                // buffer and occludes edges and labels behind it.
                SceneNode::Surface { mesh, .. } => self.render_surface(mesh, camera),
                SceneNode::Wireframe {
                    cylinders,
                    color,
                    radius,
                } => {
                    let character = edge_character(*radius);
                    for cylinder in cylinders {
                        self.render_segment(cylinder, character, color.rgb8(), camera);
                    }
                }
                SceneNode::Label(sprite) => self.render_label(sprite, camera),
            }
        }
    }

    fn render_surface(&mut self, mesh: &Mesh, camera: &OrthoCamera) {
        for tri in &mesh.triangles {
            let mut screen_coords = Vec::new();
            for &index in tri {
                let point = mesh.positions[index as usize];
                if let Some(coords) =
                    camera.project_to_screen(&point, self.width as u32, self.height as u32)
                {
                    screen_coords.push(coords);
                } else {
                    break; // Triangle is clipped
                }
            }
            if screen_coords.len() == 3 {
                self.rasterize_triangle(&screen_coords);
            }
        }
    }

    /// Depth-only scanline fill, straight barycentric test per cell.
    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)]) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box clipped to the cell grid
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = ' ';
                        }
                    }
                }
            }
        }
    }

    /// Draw one edge cylinder as its axis segment.
    fn render_segment(
        &mut self,
        cylinder: &EdgeCylinder,
        character: char,
        color: (u8, u8, u8),
        camera: &OrthoCamera,
    ) {
        let half_axis = cylinder.rotation * Vector3::y() * (cylinder.length / 2.0);
        let start = cylinder.center - half_axis;
        let end = cylinder.center + half_axis;

        let a = camera.project_to_screen(&start, self.width as u32, self.height as u32);
        let b = camera.project_to_screen(&end, self.width as u32, self.height as u32);
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => return, // Segment is clipped
        };

        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0);
        for i in 0..=steps as i32 {
            let t = i as f32 / steps;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t - EDGE_DEPTH_BIAS;
            self.plot(x as i32, y as i32, depth, character, color);
        }
    }

    /// Labels render as their text centered on the projected sprite
    /// position; cell granularity stands in for the sprite quad.
    fn render_label(&mut self, sprite: &LabelSprite, camera: &OrthoCamera) {
        let position = Point3::new(sprite.position[0], sprite.position[1], sprite.position[2]);
        let (sx, sy, depth) =
            match camera.project_to_screen(&position, self.width as u32, self.height as u32) {
                Some(coords) => coords,
                None => return,
            };

        let color = sprite.color.rgb8();
        let count = sprite.text.chars().count() as i32;
        let row = sy as i32;
        let start_col = sx as i32 - count / 2;
        for (i, ch) in sprite.text.chars().enumerate() {
            self.plot(start_col + i as i32, row, depth, ch, color);
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, color: (u8, u8, u8)) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    /// Flush the cell grid to the terminal at an origin offset, painting
    /// the scene background behind every cell.
    pub fn draw_region<W: Write>(
        &self,
        writer: &mut W,
        origin_col: u16,
        origin_row: u16,
        background: (u8, u8, u8),
    ) -> std::io::Result<()> {
        let bg = Color::Rgb {
            r: background.0,
            g: background.1,
            b: background.2,
        };
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(origin_col, origin_row + y as u16))?;
            writer.queue(SetBackgroundColor(bg))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let (r, g, b) = self.color_buffer[idx];
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kukan_core::edges::{edge_cylinders, DEFAULT_FEATURE_ANGLE_DEG, THIN_EDGE_RADIUS};
    use kukan_core::registry::Theme;

    #[test]
    fn thick_tier_draws_denser_glyphs() {
        assert_ne!(edge_character(THICK_EDGE_RADIUS), edge_character(THIN_EDGE_RADIUS));
    }

    #[test]
    fn cube_wireframe_marks_cells() {
        let palette = Theme::Default.colors();
        let mut scene = Scene::new(palette.dark);
        let mesh = Mesh::cube(1.0);
        scene.add(SceneNode::Wireframe {
            cylinders: edge_cylinders(&mesh, DEFAULT_FEATURE_ANGLE_DEG),
            color: palette.light,
            radius: THIN_EDGE_RADIUS,
        });

        let mut renderer = AsciiRenderer::new(60, 30);
        let camera = OrthoCamera::new(60.0, 30.0);
        renderer.render_scene(&scene, &camera);

        let drawn = renderer.char_buffer.iter().filter(|ch| **ch != ' ').count();
        assert!(drawn > 0);
    }

    #[test]
    fn surface_occludes_edges_behind_it() {
        let palette = Theme::Default.colors();
        let mesh = Mesh::cube(1.0);
        let mut scene = Scene::new(palette.dark);
        scene.add(SceneNode::Surface {
            mesh: mesh.clone(),
            color: palette.dark,
        });
        scene.add(SceneNode::Wireframe {
            cylinders: edge_cylinders(&mesh, DEFAULT_FEATURE_ANGLE_DEG),
            color: palette.light,
            radius: THIN_EDGE_RADIUS,
        });

        let mut with_surface = AsciiRenderer::new(60, 30);
        let camera = OrthoCamera::new(60.0, 30.0);
        with_surface.render_scene(&scene, &camera);

        let mut edges_only = AsciiRenderer::new(60, 30);
        let mut bare = Scene::new(palette.dark);
        bare.add(SceneNode::Wireframe {
            cylinders: edge_cylinders(&mesh, DEFAULT_FEATURE_ANGLE_DEG),
            color: palette.light,
            radius: THIN_EDGE_RADIUS,
        });
        edges_only.render_scene(&bare, &camera);

        let count = |r: &AsciiRenderer| r.char_buffer.iter().filter(|ch| **ch != ' ').count();
        // Hidden back edges drop out once the surface fills the depth buffer.
        assert!(count(&with_surface) < count(&edges_only));
    }
}
