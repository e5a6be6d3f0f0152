//! Top-level viewer controller.
//!
//! Owns the UI state and fans host intents out to the synchronizer, the
//! fact cards and the navigation state. Hosts stay thin: they translate
//! input events into these methods and draw from the accessors.

use crate::cards::{CardFace, FactCardController};
use crate::config::ViewerConfig;
use crate::label::FontMetrics;
use crate::loader::ModelSource;
use crate::nav::{NavController, Section};
use crate::registry::{
    menu_labels, model_path, welcome, MenuLabels, ScriptMode, Theme, WelcomeSpec, VIEWPORT_COUNT,
};
use crate::state::UiState;
use crate::sync::SceneSynchronizer;

pub struct Viewer {
    state: UiState,
    sync: SceneSynchronizer,
    cards: FactCardController,
    nav: NavController,
    config: ViewerConfig,
    host_width: f32,
    host_height: f32,
}

impl Viewer {
    pub fn new(config: ViewerConfig, host_width: f32, host_height: f32) -> Self {
        let state = UiState::default();
        Self {
            sync: SceneSynchronizer::new(state.mode, state.theme, host_width),
            cards: FactCardController::new(state.mode, state.units),
            nav: NavController::new(),
            config,
            host_width,
            host_height,
            state,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn sync(&self) -> &SceneSynchronizer {
        &self.sync
    }

    pub fn nav(&self) -> &NavController {
        &self.nav
    }

    pub fn section(&self) -> Section {
        self.nav.section()
    }

    pub fn welcome(&self) -> WelcomeSpec {
        welcome(self.state.mode)
    }

    pub fn menu_labels(&self) -> MenuLabels {
        menu_labels(self.state.mode)
    }

    pub fn mode_button_glyph(&self) -> &'static str {
        self.state.mode.button_glyph()
    }

    pub fn card_face(&self, index: usize) -> CardFace {
        self.cards.face(index)
    }

    pub fn cards_animating(&self) -> bool {
        self.cards.is_animating()
    }

    /// Cycle script mode: labels rebuild, cards and chrome re-render.
    pub fn cycle_mode(&mut self) {
        self.set_mode(self.state.mode.next());
    }

    pub fn set_mode(&mut self, mode: ScriptMode) {
        self.state.mode = mode;
        self.sync.set_mode(mode);
        self.cards.refresh(mode, self.state.units);
    }

    /// Cycle color theme across scenes and chrome.
    pub fn cycle_theme(&mut self) {
        self.set_theme(self.state.theme.next());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.sync.set_theme(theme);
    }

    /// Flip between metric and imperial card values.
    pub fn toggle_units(&mut self) {
        let units = self.state.toggle_units();
        self.cards.refresh(self.state.mode, units);
    }

    pub fn toggle_menu(&mut self) {
        self.nav.toggle_menu();
    }

    pub fn close_menu(&mut self) {
        self.nav.close_menu();
    }

    /// Switch sections; the first arrival at the geometry section builds
    /// the three viewports against the registry's model table.
    pub fn navigate(&mut self, section: Section) {
        if self.nav.navigate(section) {
            for slot in 0..VIEWPORT_COUNT {
                self.sync
                    .init_viewport(slot, model_path(slot), self.host_width, self.host_height);
                if let Some(vp) = self.sync.viewport_mut(slot) {
                    vp.rig.easing = self.config.easing();
                }
            }
        }
    }

    /// Host window/terminal resize: update the edge-thickness tier.
    pub fn resize_host(&mut self, width: f32, height: f32) {
        self.host_width = width;
        self.host_height = height;
        self.sync.update_edge_thickness(width);
    }

    /// Per-canvas resize keeps that viewport's frustum in step.
    pub fn resize_viewport(&mut self, slot: usize, width: f32, height: f32) {
        self.sync.resize_viewport(slot, width, height);
    }

    pub fn pointer_moved(&mut self, slot: usize, nx: f32, ny: f32) {
        self.sync.pointer_moved(slot, nx, ny);
    }

    pub fn hover_card(&mut self, index: usize) {
        self.cards.hover_start(index);
    }

    pub fn unhover_card(&mut self, index: usize) {
        self.cards.hover_end(index);
    }

    /// One frame: ease cameras and advance card tweens.
    pub fn advance_frame(&mut self, elapsed_ms: u32) {
        self.sync.tick_cameras();
        self.cards.advance_by(elapsed_ms);
    }

    /// Drive pending mesh/label tasks against the host's collaborators.
    pub fn pump(&mut self, models: &dyn ModelSource, fonts: &dyn FontMetrics) {
        self.sync.pump(models, fonts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::HeuristicFontMetrics;
    use crate::loader::MemoryModelSource;
    use crate::registry::{label_group, ScriptMode, Theme};

    const TRI: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn stocked() -> MemoryModelSource {
        let mut source = MemoryModelSource::new();
        for slot in 0..VIEWPORT_COUNT {
            source.insert(model_path(slot), TRI);
        }
        source
    }

    #[test]
    fn first_geometry_visit_builds_viewports() {
        let mut viewer = Viewer::new(ViewerConfig::default(), 1280.0, 720.0);
        assert_eq!(viewer.sync().live_count(), 0);
        viewer.navigate(Section::Geometry);
        assert_eq!(viewer.sync().live_count(), VIEWPORT_COUNT);
        viewer.pump(&stocked(), &HeuristicFontMetrics);
        for slot in 0..VIEWPORT_COUNT {
            assert!(viewer.sync().viewport(slot).unwrap().scene.has_surface());
        }
    }

    #[test]
    fn revisiting_geometry_reuses_the_viewports() {
        let mut viewer = Viewer::new(ViewerConfig::default(), 1280.0, 720.0);
        viewer.navigate(Section::Geometry);
        viewer.pump(&stocked(), &HeuristicFontMetrics);
        viewer.navigate(Section::Welcome);
        viewer.navigate(Section::Geometry);
        // No fresh tasks were queued by the revisit.
        assert_eq!(viewer.sync().pending_tasks(), 0);
    }

    #[test]
    fn cycling_mode_updates_labels_cards_and_chrome() {
        let mut viewer = Viewer::new(ViewerConfig::default(), 1280.0, 720.0);
        viewer.navigate(Section::Geometry);
        let source = stocked();
        viewer.pump(&source, &HeuristicFontMetrics);

        assert_eq!(viewer.state().mode, ScriptMode::Hiragana);
        viewer.cycle_mode();
        assert_eq!(viewer.state().mode, ScriptMode::Kanji);
        assert_eq!(viewer.mode_button_glyph(), "漢");
        assert_eq!(viewer.card_face(0).text, "重い");

        viewer.pump(&source, &HeuristicFontMetrics);
        let vp = viewer.sync().viewport(0).unwrap();
        assert_eq!(
            vp.scene.label_count(),
            label_group(ScriptMode::Kanji, 0).len()
        );
    }

    #[test]
    fn theme_cycle_repaints_scenes() {
        let mut viewer = Viewer::new(ViewerConfig::default(), 1280.0, 720.0);
        viewer.navigate(Section::Geometry);
        viewer.pump(&stocked(), &HeuristicFontMetrics);
        viewer.cycle_theme();
        assert_eq!(viewer.state().theme, Theme::Pastel);
        let palette = Theme::Pastel.colors();
        let vp = viewer.sync().viewport(0).unwrap();
        assert_eq!(vp.scene.background, palette.dark);
    }

    #[test]
    fn config_easing_reaches_the_rigs() {
        let config: ViewerConfig = toml::from_str("easing = 0.5").unwrap();
        let mut viewer = Viewer::new(config, 1280.0, 720.0);
        viewer.navigate(Section::Geometry);
        let rig = &viewer.sync().viewport(0).unwrap().rig;
        assert!((rig.easing - 0.5).abs() < 1e-9);
    }
}
