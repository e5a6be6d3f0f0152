//! Scene synchronizer. Keeps every viewport's surface, wireframe overlay
//! and label sprites consistent with the active mode and theme.
//!
//! Mesh loads and label builds are modeled as queued tasks driven by
//! [`SceneSynchronizer::pump`] from the host's frame loop. Label tasks
//! carry the generation current when they were queued; a mode or theme
//! change bumps the slot's generation, so completions that lost the race
//! discard themselves instead of attaching stale sprites.

use log::debug;

use crate::camera::CameraRig;
use crate::edges::{edge_cylinders, edge_radius_for_width, DEFAULT_FEATURE_ANGLE_DEG};
use crate::label::{build_label_sprite, FontMetrics};
use crate::loader::ModelSource;
use crate::registry::{label_group, LabelPlacement, ScriptMode, Theme, VIEWPORT_COUNT};
use crate::scene::{Scene, SceneNode};

/// One live viewport: an owned scene plus its parallax camera.
pub struct Viewport {
    pub scene: Scene,
    pub rig: CameraRig,
    label_generation: u64,
}

struct PendingMesh {
    slot: usize,
    path: &'static str,
}

struct PendingLabel {
    slot: usize,
    generation: u64,
    placement: LabelPlacement,
}

pub struct SceneSynchronizer {
    viewports: [Option<Viewport>; VIEWPORT_COUNT],
    mode: ScriptMode,
    theme: Theme,
    edge_radius: f32,
    pending_meshes: Vec<PendingMesh>,
    pending_labels: Vec<PendingLabel>,
}

impl SceneSynchronizer {
    pub fn new(mode: ScriptMode, theme: Theme, host_width: f32) -> Self {
        Self {
            viewports: Default::default(),
            mode,
            theme,
            edge_radius: edge_radius_for_width(host_width),
            pending_meshes: Vec::new(),
            pending_labels: Vec::new(),
        }
    }

    pub fn mode(&self) -> ScriptMode {
        self.mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self, slot: usize) -> Option<&Viewport> {
        self.viewports[slot].as_ref()
    }

    pub fn viewport_mut(&mut self, slot: usize) -> Option<&mut Viewport> {
        self.viewports[slot].as_mut()
    }

    pub fn live_count(&self) -> usize {
        self.viewports.iter().filter(|v| v.is_some()).count()
    }

    /// Tasks not yet driven to completion by [`pump`](Self::pump).
    pub fn pending_tasks(&self) -> usize {
        self.pending_meshes.len() + self.pending_labels.len()
    }

    /// Register a viewport slot and queue its mesh load. Calling again on
    /// a live slot rebuilds it from scratch; superseded tasks are purged.
    pub fn init_viewport(&mut self, slot: usize, path: &'static str, width: f32, height: f32) {
        debug_assert!(slot < VIEWPORT_COUNT);
        self.pending_meshes.retain(|t| t.slot != slot);
        self.pending_labels.retain(|t| t.slot != slot);
        self.viewports[slot] = Some(Viewport {
            scene: Scene::new(self.theme.colors().dark),
            rig: CameraRig::new(width, height),
            label_generation: 0,
        });
        self.pending_meshes.push(PendingMesh { slot, path });
    }

    /// Keep a viewport's frustum matched to its canvas on resize.
    pub fn resize_viewport(&mut self, slot: usize, width: f32, height: f32) {
        if let Some(vp) = self.viewports[slot].as_mut() {
            vp.rig.camera.set_viewport(width, height);
        }
    }

    pub fn pointer_moved(&mut self, slot: usize, nx: f32, ny: f32) {
        if let Some(vp) = self.viewports[slot].as_mut() {
            vp.rig.pointer_moved(nx, ny);
        }
    }

    /// Advance every live camera one easing step.
    pub fn tick_cameras(&mut self) {
        for vp in self.viewports.iter_mut().flatten() {
            vp.rig.tick();
        }
    }

    /// Switch script mode: every live scene synchronously drops its labels,
    /// then new label builds are queued for the slot's group. A scene never
    /// holds labels from two modes at once.
    pub fn set_mode(&mut self, mode: ScriptMode) {
        self.mode = mode;
        for slot in 0..VIEWPORT_COUNT {
            self.rebuild_slot_labels(slot);
        }
    }

    /// Switch theme: repaint background, surface and wireframe in place,
    /// then rebuild labels since their bitmaps bake the foreground color.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        let palette = theme.colors();
        for vp in self.viewports.iter_mut().flatten() {
            vp.scene.recolor(&palette);
        }
        // Re-running the mode path regenerates every label in the new
        // light color.
        let mode = self.mode;
        self.set_mode(mode);
    }

    /// Recompute the two-tier edge thickness for the host width and, when
    /// the tier changes, update every overlay in place.
    pub fn update_edge_thickness(&mut self, host_width: f32) {
        let radius = edge_radius_for_width(host_width);
        if (radius - self.edge_radius).abs() < f32::EPSILON {
            return;
        }
        self.edge_radius = radius;
        for vp in self.viewports.iter_mut().flatten() {
            vp.scene.set_wireframe_radius(radius);
        }
    }

    /// Drive queued loads to completion against the collaborators.
    ///
    /// Mesh completions attach the flat-shaded surface and its feature-edge
    /// overlay, then request the slot's labels. Label tasks wait until the
    /// metrics collaborator reports ready, so sprites are never measured
    /// against a fallback font. A failed mesh load leaves the viewport
    /// empty and is only logged.
    pub fn pump(&mut self, models: &dyn ModelSource, fonts: &dyn FontMetrics) {
        let meshes = std::mem::take(&mut self.pending_meshes);
        for task in meshes {
            if self.viewports[task.slot].is_none() {
                continue;
            }
            match models.load(task.path) {
                Ok(mesh) => {
                    let palette = self.theme.colors();
                    let radius = self.edge_radius;
                    if let Some(vp) = self.viewports[task.slot].as_mut() {
                        vp.scene.add(SceneNode::Wireframe {
                            cylinders: edge_cylinders(&mesh, DEFAULT_FEATURE_ANGLE_DEG),
                            color: palette.light,
                            radius,
                        });
                        vp.scene.add(SceneNode::Surface {
                            mesh,
                            color: palette.dark,
                        });
                    }
                    self.rebuild_slot_labels(task.slot);
                }
                Err(err) => debug!("viewport {}: {err}", task.slot),
            }
        }

        if !fonts.ready() {
            // Labels stay queued until both families are loaded.
            return;
        }
        let labels = std::mem::take(&mut self.pending_labels);
        let family = self.mode.font_family();
        let light = self.theme.colors().light;
        for task in labels {
            let current = match self.viewports[task.slot].as_ref() {
                Some(vp) => vp.label_generation,
                None => continue,
            };
            if task.generation != current {
                // Superseded by a later mode or theme switch.
                continue;
            }
            if let Some(mut sprite) =
                build_label_sprite(task.placement.text, family, light, fonts)
            {
                sprite.position = task.placement.position;
                sprite.rotation = task.placement.rotation;
                if let Some(vp) = self.viewports[task.slot].as_mut() {
                    vp.scene.add(SceneNode::Label(sprite));
                }
            }
        }
    }

    fn rebuild_slot_labels(&mut self, slot: usize) {
        let mode = self.mode;
        if let Some(vp) = self.viewports[slot].as_mut() {
            vp.scene.remove_labels();
            vp.label_generation += 1;
            let generation = vp.label_generation;
            self.pending_labels.retain(|t| t.slot != slot);
            for placement in label_group(mode, slot).entries() {
                self.pending_labels.push(PendingLabel {
                    slot,
                    generation,
                    placement,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::HeuristicFontMetrics;
    use crate::loader::MemoryModelSource;
    use crate::registry::model_path;

    const CUBE: &str = "\
v -0.5 -0.5 -0.5
v 0.5 -0.5 -0.5
v -0.5 0.5 -0.5
v 0.5 0.5 -0.5
v -0.5 -0.5 0.5
v 0.5 -0.5 0.5
v -0.5 0.5 0.5
v 0.5 0.5 0.5
f 2 4 8 6
f 1 5 7 3
f 3 7 8 4
f 1 2 6 5
f 5 6 8 7
f 1 3 4 2
";

    fn stocked_source() -> MemoryModelSource {
        let mut source = MemoryModelSource::new();
        for slot in 0..VIEWPORT_COUNT {
            source.insert(model_path(slot), CUBE);
        }
        source
    }

    fn settled() -> SceneSynchronizer {
        let mut sync = SceneSynchronizer::new(ScriptMode::Hiragana, Theme::Default, 1280.0);
        for slot in 0..VIEWPORT_COUNT {
            sync.init_viewport(slot, model_path(slot), 640.0, 480.0);
        }
        sync.pump(&stocked_source(), &HeuristicFontMetrics);
        sync
    }

    #[test]
    fn pump_attaches_surface_overlay_and_labels() {
        let sync = settled();
        for slot in 0..VIEWPORT_COUNT {
            let vp = sync.viewport(slot).unwrap();
            assert!(vp.scene.has_surface());
            assert_eq!(
                vp.scene.label_count(),
                label_group(ScriptMode::Hiragana, slot).len()
            );
        }
        assert_eq!(sync.pending_tasks(), 0);
    }

    #[test]
    fn failed_load_leaves_the_viewport_empty() {
        let mut sync = SceneSynchronizer::new(ScriptMode::Hiragana, Theme::Default, 1280.0);
        sync.init_viewport(0, model_path(0), 640.0, 480.0);
        sync.pump(&MemoryModelSource::new(), &HeuristicFontMetrics);
        let vp = sync.viewport(0).unwrap();
        assert!(!vp.scene.has_surface());
        assert_eq!(vp.scene.nodes().len(), 0);
        assert_eq!(sync.pending_tasks(), 0);
    }

    #[test]
    fn labels_wait_for_font_readiness() {
        struct NotReady;
        impl crate::label::FontMetrics for NotReady {
            fn ready(&self) -> bool {
                false
            }
            fn measure(&self, text: &str, family: crate::registry::FontFamily) -> f32 {
                HeuristicFontMetrics.measure(text, family)
            }
            fn rasterize(
                &self,
                _text: &str,
                _family: crate::registry::FontFamily,
            ) -> Option<crate::label::AlphaBitmap> {
                None
            }
        }

        let mut sync = SceneSynchronizer::new(ScriptMode::Hiragana, Theme::Default, 1280.0);
        sync.init_viewport(0, model_path(0), 640.0, 480.0);
        let source = stocked_source();
        sync.pump(&source, &NotReady);
        let deferred = sync.pending_tasks();
        assert!(deferred > 0);
        assert_eq!(sync.viewport(0).unwrap().scene.label_count(), 0);

        sync.pump(&source, &HeuristicFontMetrics);
        assert_eq!(sync.pending_tasks(), 0);
        assert_eq!(
            sync.viewport(0).unwrap().scene.label_count(),
            label_group(ScriptMode::Hiragana, 0).len()
        );
    }

    #[test]
    fn reinit_purges_superseded_tasks() {
        let mut sync = SceneSynchronizer::new(ScriptMode::Hiragana, Theme::Default, 1280.0);
        sync.init_viewport(0, model_path(0), 640.0, 480.0);
        sync.init_viewport(0, model_path(0), 640.0, 480.0);
        assert_eq!(sync.pending_tasks(), 1);
        sync.pump(&stocked_source(), &HeuristicFontMetrics);
        assert!(sync.viewport(0).unwrap().scene.has_surface());
    }
}
