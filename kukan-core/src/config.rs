//! Viewer tuning configuration loaded from data/config/viewer.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::camera;

pub const DEFAULT_TARGET_FPS: u32 = 30;
pub const DEFAULT_ASSET_ROOT: &str = "assets";

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    pub easing: Option<f32>,
    pub target_fps: Option<u32>,
    pub asset_root: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            easing: Some(camera::EASING),
            target_fps: Some(DEFAULT_TARGET_FPS),
            asset_root: Some(PathBuf::from(DEFAULT_ASSET_ROOT)),
        }
    }
}

impl ViewerConfig {
    pub fn easing(&self) -> f32 {
        self.easing.unwrap_or(camera::EASING)
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps.unwrap_or(DEFAULT_TARGET_FPS).max(1)
    }

    pub fn asset_root(&self) -> PathBuf {
        self.asset_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT))
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

pub fn load_default() -> Result<ViewerConfig> {
    let path = data_root().join("config/viewer.toml");
    let mut cfg = if path.is_file() {
        let txt =
            std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<ViewerConfig>(&txt).context("parse viewer TOML")?
    } else {
        ViewerConfig::default()
    };
    // Env overrides for quick tuning (optional)
    if let Ok(s) = std::env::var("KUKAN_EASING") {
        cfg.easing = s.parse().ok();
    }
    if let Ok(s) = std::env::var("KUKAN_FPS") {
        cfg.target_fps = s.parse().ok();
    }
    if let Ok(s) = std::env::var("KUKAN_ASSETS") {
        cfg.asset_root = Some(PathBuf::from(s));
    }
    Ok(cfg)
}
