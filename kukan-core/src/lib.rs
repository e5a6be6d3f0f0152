/// Kukan Core Library - Shared viewer logic for every host
///
/// This library provides the stateless registries and the stateful
/// controllers of the trilingual geometry viewer: theme/mode/card data,
/// OBJ parsing, feature-edge extraction, label sprites, the parallax
/// camera rig, the scene synchronizer, fact-card animation, navigation
/// and tuning configuration. Hosts add input and drawing.

pub mod camera;
pub mod cards;
pub mod config;
pub mod edges;
pub mod error;
pub mod geometry;
pub mod label;
pub mod loader;
pub mod nav;
pub mod obj;
pub mod registry;
pub mod scene;
pub mod state;
pub mod sync;
pub mod viewer;

// Re-export commonly used types
pub use camera::{CameraRig, OrthoCamera};
pub use cards::{CardFace, FactCardController};
pub use config::ViewerConfig;
pub use error::{FontError, ModelError};
pub use geometry::Mesh;
pub use label::{
    build_label_sprite, FontMetrics, GlyphFontMetrics, HeuristicFontMetrics, LabelSprite,
};
pub use loader::{FsModelSource, MemoryModelSource, ModelSource};
pub use nav::{NavController, Section};
pub use registry::{Color, ScriptMode, Theme, UnitSystem, VIEWPORT_COUNT};
pub use scene::{Scene, SceneNode};
pub use state::UiState;
pub use sync::SceneSynchronizer;
pub use viewer::Viewer;
