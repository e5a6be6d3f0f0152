//! End-to-end synchronizer scenarios across mode, theme and thickness
//! changes, driven the way a host frame loop would.

use std::cell::Cell;

use kukan_core::label::{AlphaBitmap, FontMetrics, HeuristicFontMetrics};
use kukan_core::loader::MemoryModelSource;
use kukan_core::registry::{
    label_group, model_path, Color, FontFamily, ScriptMode, Theme, VIEWPORT_COUNT,
};
use kukan_core::scene::SceneNode;
use kukan_core::sync::SceneSynchronizer;

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

/// Heuristic metrics behind a switchable readiness flag, standing in for
/// a font file that has not finished loading.
struct GatedFonts {
    ready: Cell<bool>,
}

impl GatedFonts {
    fn not_ready() -> Self {
        Self {
            ready: Cell::new(false),
        }
    }
}

impl FontMetrics for GatedFonts {
    fn ready(&self) -> bool {
        self.ready.get()
    }

    fn measure(&self, text: &str, family: FontFamily) -> f32 {
        HeuristicFontMetrics.measure(text, family)
    }

    fn rasterize(&self, _text: &str, _family: FontFamily) -> Option<AlphaBitmap> {
        None
    }
}

fn settled(mode: ScriptMode, theme: Theme) -> SceneSynchronizer {
    let mut sync = SceneSynchronizer::new(mode, theme, 1280.0);
    for slot in 0..VIEWPORT_COUNT {
        sync.init_viewport(slot, model_path(slot), 640.0, 480.0);
    }
    sync.pump(&stocked_source(), &HeuristicFontMetrics);
    sync
}

fn label_set(sync: &SceneSynchronizer, slot: usize) -> Vec<(String, [u32; 3])> {
    // Positions keyed by their bit patterns so the set comparison is exact.
    let mut set: Vec<_> = sync
        .viewport(slot)
        .unwrap()
        .scene
        .labels()
        .map(|sprite| {
            (
                sprite.text.clone(),
                [
                    sprite.position[0].to_bits(),
                    sprite.position[1].to_bits(),
                    sprite.position[2].to_bits(),
                ],
            )
        })
        .collect();
    set.sort();
    set
}

#[test]
fn mode_switches_settle_to_exact_label_counts() {
    let mut sync = settled(ScriptMode::Hiragana, Theme::Default);
    let source = stocked_source();

    for &mode in &[ScriptMode::Kanji, ScriptMode::English, ScriptMode::Hiragana] {
        sync.set_mode(mode);
        sync.pump(&source, &HeuristicFontMetrics);
        for slot in 0..VIEWPORT_COUNT {
            assert_eq!(
                sync.viewport(slot).unwrap().scene.label_count(),
                label_group(mode, slot).len(),
                "slot {slot} after switching to {mode:?}"
            );
        }
    }
}

#[test]
fn a_scene_never_holds_labels_from_two_modes() {
    let mut sync = settled(ScriptMode::Hiragana, Theme::Default);

    // Removal is synchronous: between the switch and the pump the scene
    // shows no labels at all.
    sync.set_mode(ScriptMode::English);
    for slot in 0..VIEWPORT_COUNT {
        assert_eq!(sync.viewport(slot).unwrap().scene.label_count(), 0);
    }

    sync.pump(&stocked_source(), &HeuristicFontMetrics);
    let expected: Vec<&str> = label_group(ScriptMode::English, 0).texts.to_vec();
    for sprite in sync.viewport(0).unwrap().scene.labels() {
        assert!(expected.contains(&sprite.text.as_str()));
    }
}

#[test]
fn mode_round_trip_restores_the_same_label_set() {
    let mut sync = settled(ScriptMode::Hiragana, Theme::Default);
    let source = stocked_source();
    let before = label_set(&sync, 1);

    sync.set_mode(ScriptMode::Kanji);
    sync.pump(&source, &HeuristicFontMetrics);
    sync.set_mode(ScriptMode::Hiragana);
    sync.pump(&source, &HeuristicFontMetrics);

    assert_eq!(label_set(&sync, 1), before);
}

#[test]
fn kanji_viewport_zero_gets_inside_and_outside() {
    let mut sync = settled(ScriptMode::Hiragana, Theme::Default);
    sync.set_mode(ScriptMode::Kanji);
    sync.pump(&stocked_source(), &HeuristicFontMetrics);

    let vp = sync.viewport(0).unwrap();
    let mut labels: Vec<_> = vp.scene.labels().collect();
    labels.sort_by_key(|sprite| sprite.text.clone());
    assert_eq!(labels.len(), 2);

    assert_eq!(labels[0].text, "中");
    assert_eq!(labels[0].position, [0.0, 0.0, 0.0]);
    assert_eq!(labels[0].rotation, [0.0, 0.0]);

    assert_eq!(labels[1].text, "外");
    assert_eq!(labels[1].position, [0.0, 0.58, 0.0]);
    assert_eq!(labels[1].rotation, [0.0, 0.0]);
}

#[test]
fn theme_switch_repaints_every_material() {
    let mut sync = settled(ScriptMode::Hiragana, Theme::Default);
    let before = Theme::Default.colors();
    assert_eq!(before.dark, Color::hex(0x000000));

    sync.set_theme(Theme::Pastel);
    sync.pump(&stocked_source(), &HeuristicFontMetrics);

    let palette = Theme::Pastel.colors();
    assert_eq!(palette.dark, Color::hex(0xF6D0E3));
    assert_eq!(palette.light, Color::hex(0x464B9A));
    for slot in 0..VIEWPORT_COUNT {
        let scene = &sync.viewport(slot).unwrap().scene;
        assert_eq!(scene.background, palette.dark);
        for node in scene.nodes() {
            match node {
                SceneNode::Surface { color, .. } => assert_eq!(*color, palette.dark),
                SceneNode::Wireframe { color, .. } => assert_eq!(*color, palette.light),
                SceneNode::Label(sprite) => assert_eq!(sprite.color, palette.light),
            }
        }
    }
}

#[test]
fn deferred_labels_flush_when_fonts_arrive() {
    let mut sync = SceneSynchronizer::new(ScriptMode::English, Theme::Default, 1280.0);
    sync.init_viewport(2, model_path(2), 640.0, 480.0);
    let source = stocked_source();
    let fonts = GatedFonts::not_ready();

    sync.pump(&source, &fonts);
    assert!(sync.viewport(2).unwrap().scene.has_surface());
    assert_eq!(sync.viewport(2).unwrap().scene.label_count(), 0);
    assert!(sync.pending_tasks() > 0);

    fonts.ready.set(true);
    sync.pump(&source, &fonts);
    assert_eq!(
        sync.viewport(2).unwrap().scene.label_count(),
        label_group(ScriptMode::English, 2).len()
    );
    assert_eq!(sync.pending_tasks(), 0);
}

#[test]
fn mode_switch_while_fonts_pending_yields_only_new_labels() {
    let mut sync = SceneSynchronizer::new(ScriptMode::Hiragana, Theme::Default, 1280.0);
    sync.init_viewport(0, model_path(0), 640.0, 480.0);
    let source = stocked_source();
    let fonts = GatedFonts::not_ready();

    // Hiragana labels are queued but cannot build yet.
    sync.pump(&source, &fonts);
    // The switch supersedes them before they ever attach.
    sync.set_mode(ScriptMode::Kanji);

    fonts.ready.set(true);
    sync.pump(&source, &fonts);

    let texts: Vec<String> = sync
        .viewport(0)
        .unwrap()
        .scene
        .labels()
        .map(|sprite| sprite.text.clone())
        .collect();
    let expected: Vec<&str> = label_group(ScriptMode::Kanji, 0).texts.to_vec();
    assert_eq!(texts.len(), expected.len());
    for text in &texts {
        assert!(expected.contains(&text.as_str()), "unexpected label {text}");
    }
}

#[test]
fn edge_thickness_tier_updates_every_overlay() {
    let mut sync = settled(ScriptMode::Hiragana, Theme::Default);

    sync.update_edge_thickness(480.0);
    for slot in 0..VIEWPORT_COUNT {
        for node in sync.viewport(slot).unwrap().scene.nodes() {
            if let SceneNode::Wireframe { radius, .. } = node {
                assert!((radius - 0.006).abs() < 1e-9);
            }
        }
    }

    // Crossing back to the wide tier thins the overlays again.
    sync.update_edge_thickness(1920.0);
    for node in sync.viewport(0).unwrap().scene.nodes() {
        if let SceneNode::Wireframe { radius, .. } = node {
            assert!((radius - 0.003).abs() < 1e-9);
        }
    }
}
