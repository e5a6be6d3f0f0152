/// Kukan Web - WASM host bindings for the trilingual geometry viewer
///
/// The page owns fetching and the render loop. It pushes model and font
/// bytes into the handle, forwards UI events, and reads flat draw
/// buffers back out once per animation frame per canvas.

use kukan_core::config::ViewerConfig;
use kukan_core::label::GlyphFontMetrics;
use kukan_core::loader::MemoryModelSource;
use kukan_core::nav::Section;
use kukan_core::registry::{FontFamily, ScriptMode, Theme};
use kukan_core::scene::SceneNode;
use kukan_core::sync::Viewport;
use kukan_core::viewer::Viewer;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ViewerHandle {
    viewer: Viewer,
    models: MemoryModelSource,
    fonts: GlyphFontMetrics,
}

#[wasm_bindgen]
impl ViewerHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(host_width: f32, host_height: f32) -> ViewerHandle {
        ViewerHandle {
            viewer: Viewer::new(ViewerConfig::default(), host_width, host_height),
            models: MemoryModelSource::new(),
            fonts: GlyphFontMetrics::new(),
        }
    }

    /// Register fetched OBJ text under the path the model table names.
    pub fn supply_model_bytes(&mut self, path: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| JsValue::from_str(&format!("{path}: {err}")))?;
        self.models.insert(path, text);
        Ok(())
    }

    /// Register a fetched font face ("latin" or "cjk").
    pub fn supply_font_bytes(&mut self, family: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let family = parse_family(family)?;
        self.fonts
            .install_bytes(family, bytes)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Switch sections ("welcome", "geometry", "physics"). The first
    /// geometry arrival builds the three viewports.
    pub fn navigate(&mut self, section: &str) -> Result<(), JsValue> {
        self.viewer.navigate(parse_section(section)?);
        Ok(())
    }

    pub fn cycle_mode(&mut self) {
        self.viewer.cycle_mode();
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = match mode {
            "hiragana" => ScriptMode::Hiragana,
            "kanji" => ScriptMode::Kanji,
            "english" => ScriptMode::English,
            other => return Err(JsValue::from_str(&format!("unknown mode {other}"))),
        };
        self.viewer.set_mode(mode);
        Ok(())
    }

    pub fn cycle_theme(&mut self) {
        self.viewer.cycle_theme();
    }

    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let theme = match theme {
            "default" => Theme::Default,
            "pastel" => Theme::Pastel,
            "peach" => Theme::Peach,
            "forest" => Theme::Forest,
            other => return Err(JsValue::from_str(&format!("unknown theme {other}"))),
        };
        self.viewer.set_theme(theme);
        Ok(())
    }

    pub fn toggle_units(&mut self) {
        self.viewer.toggle_units();
    }

    pub fn toggle_menu(&mut self) {
        self.viewer.toggle_menu();
    }

    pub fn menu_open(&self) -> bool {
        self.viewer.nav().menu_open()
    }

    /// Pointer position over one canvas, already normalized to [-1, 1].
    pub fn pointer_moved(&mut self, slot: usize, nx: f32, ny: f32) {
        self.viewer.pointer_moved(slot, nx, ny);
    }

    pub fn resize(&mut self, slot: usize, width: f32, height: f32) {
        self.viewer.resize_viewport(slot, width, height);
    }

    pub fn resize_host(&mut self, width: f32, height: f32) {
        self.viewer.resize_host(width, height);
    }

    pub fn hover_card(&mut self, index: usize) {
        self.viewer.hover_card(index);
    }

    pub fn unhover_card(&mut self, index: usize) {
        self.viewer.unhover_card(index);
    }

    /// Advance one frame: pump deferred loads, ease cameras, step tweens.
    pub fn frame(&mut self, elapsed_ms: u32) {
        self.viewer.pump(&self.models, &self.fonts);
        self.viewer.advance_frame(elapsed_ms);
    }

    pub fn has_pending(&self) -> bool {
        self.viewer.sync().pending_tasks() > 0
    }

    pub fn cards_animating(&self) -> bool {
        self.viewer.cards_animating()
    }

    // Chrome accessors: the page renders these as DOM text.

    pub fn section(&self) -> String {
        match self.viewer.section() {
            Section::Welcome => "welcome",
            Section::Geometry => "geometry",
            Section::Physics => "physics",
        }
        .to_string()
    }

    pub fn welcome_text(&self) -> String {
        self.viewer.welcome().text.to_string()
    }

    pub fn welcome_font_family(&self) -> String {
        self.viewer.welcome().family.name().to_string()
    }

    pub fn mode_button_glyph(&self) -> String {
        self.viewer.mode_button_glyph().to_string()
    }

    pub fn menu_labels(&self) -> js_sys::Array {
        let labels = self.viewer.menu_labels();
        [labels.welcome, labels.geometry, labels.physics]
            .iter()
            .map(|text| JsValue::from_str(text))
            .collect()
    }

    pub fn card_text(&self, index: usize) -> String {
        self.viewer.card_face(index).text.to_string()
    }

    pub fn card_value(&self, index: usize) -> String {
        self.viewer.card_face(index).value
    }

    // Draw buffers: flat arrays the page feeds straight to its renderer.

    /// Scene background as rgb floats in [0, 1], or empty before init.
    pub fn background_color(&self, slot: usize) -> Vec<f32> {
        match self.viewport(slot) {
            Some(vp) => vp.scene.background.rgb_f32().to_vec(),
            None => Vec::new(),
        }
    }

    /// Surface vertex positions, xyz per vertex.
    pub fn surface_positions(&self, slot: usize) -> Vec<f32> {
        let mut out = Vec::new();
        if let Some(vp) = self.viewport(slot) {
            for node in vp.scene.nodes() {
                if let SceneNode::Surface { mesh, .. } = node {
                    out.reserve(mesh.positions.len() * 3);
                    for p in &mesh.positions {
                        out.extend_from_slice(&[p.x, p.y, p.z]);
                    }
                }
            }
        }
        out
    }

    /// Surface triangle indices, three per face.
    pub fn surface_indices(&self, slot: usize) -> Vec<u32> {
        let mut out = Vec::new();
        if let Some(vp) = self.viewport(slot) {
            for node in vp.scene.nodes() {
                if let SceneNode::Surface { mesh, .. } = node {
                    for tri in &mesh.triangles {
                        out.extend_from_slice(tri);
                    }
                }
            }
        }
        out
    }

    pub fn surface_color(&self, slot: usize) -> Vec<f32> {
        self.viewport(slot)
            .and_then(|vp| {
                vp.scene.nodes().iter().find_map(|node| match node {
                    SceneNode::Surface { color, .. } => Some(color.rgb_f32().to_vec()),
                    _ => None,
                })
            })
            .unwrap_or_default()
    }

    /// Wireframe cylinders as 8 floats each: center xyz, unit quaternion
    /// ijkw, length along the local Y axis.
    pub fn edge_transforms(&self, slot: usize) -> Vec<f32> {
        let mut out = Vec::new();
        if let Some(vp) = self.viewport(slot) {
            for node in vp.scene.nodes() {
                if let SceneNode::Wireframe { cylinders, .. } = node {
                    out.reserve(cylinders.len() * 8);
                    for cyl in cylinders {
                        let q = cyl.rotation.quaternion();
                        out.extend_from_slice(&[
                            cyl.center.x,
                            cyl.center.y,
                            cyl.center.z,
                            q.coords.x,
                            q.coords.y,
                            q.coords.z,
                            q.coords.w,
                            cyl.length,
                        ]);
                    }
                }
            }
        }
        out
    }

    pub fn edge_color(&self, slot: usize) -> Vec<f32> {
        self.viewport(slot)
            .and_then(|vp| {
                vp.scene.nodes().iter().find_map(|node| match node {
                    SceneNode::Wireframe { color, .. } => Some(color.rgb_f32().to_vec()),
                    _ => None,
                })
            })
            .unwrap_or_default()
    }

    pub fn edge_radius(&self, slot: usize) -> f32 {
        self.viewport(slot)
            .and_then(|vp| {
                vp.scene.nodes().iter().find_map(|node| match node {
                    SceneNode::Wireframe { radius, .. } => Some(*radius),
                    _ => None,
                })
            })
            .unwrap_or(0.0)
    }

    pub fn label_count(&self, slot: usize) -> usize {
        self.viewport(slot)
            .map(|vp| vp.scene.label_count())
            .unwrap_or(0)
    }

    /// Label quad placements, 5 floats each: position xyz, scale xy.
    pub fn label_placements(&self, slot: usize) -> Vec<f32> {
        let mut out = Vec::new();
        if let Some(vp) = self.viewport(slot) {
            for sprite in vp.scene.labels() {
                out.extend_from_slice(&sprite.position);
                out.extend_from_slice(&sprite.scale);
            }
        }
        out
    }

    /// Baked alpha bitmap for one label, or empty when the sprite has
    /// no raster (hosts then skip the quad).
    pub fn label_bitmap(&self, slot: usize, index: usize) -> Vec<u8> {
        self.label(slot, index)
            .and_then(|sprite| sprite.bitmap.as_ref())
            .map(|bitmap| bitmap.data.clone())
            .unwrap_or_default()
    }

    /// Width and height of one label's bitmap, or empty.
    pub fn label_bitmap_size(&self, slot: usize, index: usize) -> Vec<u32> {
        self.label(slot, index)
            .and_then(|sprite| sprite.bitmap.as_ref())
            .map(|bitmap| vec![bitmap.width, bitmap.height])
            .unwrap_or_default()
    }

    /// Label text color as rgb floats, uniform across sprites.
    pub fn label_color(&self, slot: usize, index: usize) -> Vec<f32> {
        self.label(slot, index)
            .map(|sprite| sprite.color.rgb_f32().to_vec())
            .unwrap_or_default()
    }
}

impl ViewerHandle {
    fn viewport(&self, slot: usize) -> Option<&Viewport> {
        self.viewer.sync().viewport(slot)
    }

    fn label(&self, slot: usize, index: usize) -> Option<&kukan_core::label::LabelSprite> {
        self.viewport(slot)?.scene.labels().nth(index)
    }
}

fn parse_family(name: &str) -> Result<FontFamily, JsValue> {
    match name {
        "latin" => Ok(FontFamily::Latin),
        "cjk" => Ok(FontFamily::Cjk),
        other => Err(JsValue::from_str(&format!("unknown font family {other}"))),
    }
}

fn parse_section(name: &str) -> Result<Section, JsValue> {
    match name {
        "welcome" => Ok(Section::Welcome),
        "geometry" => Ok(Section::Geometry),
        "physics" => Ok(Section::Physics),
        other => Err(JsValue::from_str(&format!("unknown section {other}"))),
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    web_sys::console::log_1(&JsValue::from_str("kukan web bindings ready"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kukan_core::registry::{model_path, VIEWPORT_COUNT};

    const TRI: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn stocked_handle() -> ViewerHandle {
        let mut handle = ViewerHandle::new(1280.0, 720.0);
        for slot in 0..VIEWPORT_COUNT {
            handle
                .supply_model_bytes(model_path(slot), TRI.as_bytes())
                .unwrap();
        }
        handle
    }

    #[test]
    fn buffers_are_empty_before_geometry_arrival() {
        let handle = stocked_handle();
        assert!(handle.background_color(0).is_empty());
        assert!(handle.surface_positions(0).is_empty());
        assert_eq!(handle.label_count(0), 0);
    }

    #[test]
    fn frame_after_navigate_fills_the_draw_buffers() {
        let mut handle = stocked_handle();
        handle.navigate("geometry").unwrap();
        handle.frame(33);

        for slot in 0..VIEWPORT_COUNT {
            assert_eq!(handle.background_color(slot).len(), 3);
            assert_eq!(handle.surface_positions(slot).len(), 9);
            assert_eq!(handle.surface_indices(slot), vec![0, 1, 2]);
            // One triangle has three boundary edges.
            assert_eq!(handle.edge_transforms(slot).len(), 3 * 8);
            assert!(handle.edge_radius(slot) > 0.0);
        }
    }

    #[test]
    fn chrome_accessors_follow_the_mode() {
        let mut handle = stocked_handle();
        assert_eq!(handle.mode_button_glyph(), "あ");
        handle.cycle_mode();
        assert_eq!(handle.mode_button_glyph(), "漢");
        handle.set_mode("english").unwrap();
        assert_eq!(handle.welcome_font_family(), "Inter");
    }
}
