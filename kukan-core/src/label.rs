//! Billboard label sprites.
//!
//! Labels measure their text at a small logical font size, rasterize at a
//! much larger pixel scale so edges stay crisp under zoom, and scale the
//! resulting quad down into scene units. Measurement and rasterization go
//! through the [`FontMetrics`] trait so hosts without font files (and
//! tests) can run on a deterministic estimate instead.

use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont};

use crate::error::FontError;
use crate::registry::{Color, FontFamily};

/// Logical font size of every label, in scene-unit "pixels".
pub const FONT_SIZE: f32 = 1.4;
/// Pixels rasterized per logical unit.
pub const RASTER_SCALE: f32 = 64.0;
/// Divisor mapping measured text size to sprite scale in scene units.
pub const SCENE_DIVISOR: f32 = 12.0;

/// Grayscale coverage mask, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Text measurement and rasterization collaborator.
pub trait FontMetrics {
    /// Both font families are loaded and usable.
    fn ready(&self) -> bool;
    /// Width of `text` in logical units at [`FONT_SIZE`].
    fn measure(&self, text: &str, family: FontFamily) -> f32;
    /// Coverage mask for `text`, or `None` when no real font is available.
    fn rasterize(&self, text: &str, family: FontFamily) -> Option<AlphaBitmap>;
}

/// A billboard quad carrying one rendered label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSprite {
    pub text: String,
    pub color: Color,
    /// Measured text width in logical units.
    pub width: f32,
    /// Logical height, always [`FONT_SIZE`].
    pub height: f32,
    /// Quad scale in scene units.
    pub scale: [f32; 2],
    pub position: [f32; 3],
    /// Euler x/y rotation; z stays zero.
    pub rotation: [f32; 2],
    pub bitmap: Option<AlphaBitmap>,
}

/// Build a sprite for `text`, or `None` for empty text.
///
/// Never panics when fonts are not ready; callers sequence label builds
/// around [`FontMetrics::ready`].
pub fn build_label_sprite(
    text: &str,
    family: FontFamily,
    color: Color,
    metrics: &dyn FontMetrics,
) -> Option<LabelSprite> {
    if text.is_empty() {
        return None;
    }
    let width = metrics.measure(text, family);
    let height = FONT_SIZE;
    Some(LabelSprite {
        text: text.to_owned(),
        color,
        width,
        height,
        scale: [width / SCENE_DIVISOR, height / SCENE_DIVISOR],
        position: [0.0; 3],
        rotation: [0.0; 2],
        bitmap: metrics.rasterize(text, family),
    })
}

/// Real font metrics backed by `ab_glyph`, one face per family.
#[derive(Default)]
pub struct GlyphFontMetrics {
    latin: Option<FontArc>,
    cjk: Option<FontArc>,
}

impl GlyphFontMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one family from a font file on disk.
    pub fn load_file(&mut self, family: FontFamily, path: &Path) -> Result<(), FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|_| FontError::InvalidFont {
            path: path.to_path_buf(),
        })?;
        self.install(family, font);
        Ok(())
    }

    /// Install one family from raw font bytes (web hosts fetch them).
    pub fn install_bytes(&mut self, family: FontFamily, bytes: &[u8]) -> Result<(), FontError> {
        let font =
            FontArc::try_from_vec(bytes.to_vec()).map_err(|_| FontError::InvalidFont {
                path: family.name().into(),
            })?;
        self.install(family, font);
        Ok(())
    }

    fn install(&mut self, family: FontFamily, font: FontArc) {
        match family {
            FontFamily::Latin => self.latin = Some(font),
            FontFamily::Cjk => self.cjk = Some(font),
        }
    }

    fn face(&self, family: FontFamily) -> Option<&FontArc> {
        match family {
            FontFamily::Latin => self.latin.as_ref(),
            FontFamily::Cjk => self.cjk.as_ref(),
        }
    }
}

impl FontMetrics for GlyphFontMetrics {
    fn ready(&self) -> bool {
        self.latin.is_some() && self.cjk.is_some()
    }

    fn measure(&self, text: &str, family: FontFamily) -> f32 {
        match self.face(family) {
            Some(font) => {
                let scaled = font.as_scaled(PxScale::from(FONT_SIZE));
                text.chars()
                    .map(|ch| scaled.h_advance(font.glyph_id(ch)))
                    .sum()
            }
            // Missing face: estimate instead of panicking.
            None => HeuristicFontMetrics.measure(text, family),
        }
    }

    fn rasterize(&self, text: &str, family: FontFamily) -> Option<AlphaBitmap> {
        let font = self.face(family)?;
        let width = (self.measure(text, family) * RASTER_SCALE).ceil().max(1.0) as u32;
        let height = (FONT_SIZE * RASTER_SCALE).ceil() as u32;
        let mut data = vec![0u8; (width * height) as usize];

        let scale = PxScale::from(FONT_SIZE * RASTER_SCALE);
        let scaled = font.as_scaled(scale);
        let total_advance: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(font.glyph_id(ch)))
            .sum();
        // Center horizontally; middle-baseline vertically.
        let mut pen_x = (width as f32 - total_advance) / 2.0;
        let baseline_y = height as f32 / 2.0 + (scaled.ascent() + scaled.descent()) / 2.0;

        for ch in text.chars() {
            let id = font.glyph_id(ch);
            let glyph = Glyph {
                id,
                scale,
                position: ab_glyph::point(pen_x, baseline_y),
            };
            if let Some(og) = font.outline_glyph(glyph) {
                let bounds = og.px_bounds();
                og.draw(|x, y, v| {
                    let px = bounds.min.x as i32 + x as i32;
                    let py = bounds.min.y as i32 + y as i32;
                    if px >= 0 && (px as u32) < width && py >= 0 && (py as u32) < height {
                        let idx = (py as u32 * width + px as u32) as usize;
                        let alpha = (v * 255.0) as u8;
                        data[idx] = data[idx].max(alpha);
                    }
                });
            }
            pen_x += scaled.h_advance(id);
        }

        Some(AlphaBitmap {
            width,
            height,
            data,
        })
    }
}

/// Deterministic per-character-class estimate. Used by the terminal host,
/// which overlays label text as characters, and by tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicFontMetrics;

impl FontMetrics for HeuristicFontMetrics {
    fn ready(&self) -> bool {
        true
    }

    fn measure(&self, text: &str, _family: FontFamily) -> f32 {
        FONT_SIZE * text.chars().map(char_width_em).sum::<f32>()
    }

    fn rasterize(&self, _text: &str, _family: FontFamily) -> Option<AlphaBitmap> {
        None
    }
}

// Fullwidth CJK advances a whole em; ASCII averages just over half.
fn char_width_em(ch: char) -> f32 {
    if is_fullwidth(ch) {
        1.0
    } else if ch.is_ascii() {
        0.55
    } else {
        0.7
    }
}

fn is_fullwidth(ch: char) -> bool {
    matches!(ch,
        '\u{3000}'..='\u{303F}'   // CJK punctuation
        | '\u{3040}'..='\u{309F}' // hiragana
        | '\u{30A0}'..='\u{30FF}' // katakana
        | '\u{4E00}'..='\u{9FFF}' // unified ideographs
        | '\u{FF00}'..='\u{FFEF}' // fullwidth forms
    )
}
