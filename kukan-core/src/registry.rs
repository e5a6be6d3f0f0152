//! Static registries: color themes, script modes with their label groups,
//! fact-card tables, welcome greetings and menu labels.
//!
//! These tables are the viewer's vocabulary data. They are compiled in rather
//! than loaded: a missing mode/theme/slot is a programming error, so the
//! accessors are index-safe by construction (enums and fixed-size arrays)
//! and the alignment invariants are asserted by tests, not checked at
//! runtime.

use std::f32::consts::{FRAC_PI_2, PI};

/// Number of independent 3D viewports.
pub const VIEWPORT_COUNT: usize = 3;

/// Packed 24-bit sRGB color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(u32);

impl Color {
    pub const fn hex(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    pub const fn as_hex(self) -> u32 {
        self.0
    }

    pub fn rgb8(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    /// Channels as 0..=1 floats, for hosts that blend.
    pub fn rgb_f32(self) -> [f32; 3] {
        let (r, g, b) = self.rgb8();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// One selectable color palette. `light` styles wireframes and label text,
/// `dark` styles backgrounds and surfaces, `accent` styles host chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSpec {
    pub light: Color,
    pub dark: Color,
    pub accent: Color,
}

impl ThemeSpec {
    pub const fn new(light: u32, dark: u32, accent: u32) -> Self {
        Self {
            light: Color::hex(light),
            dark: Color::hex(dark),
            accent: Color::hex(accent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Pastel,
    Peach,
    Forest,
}

impl Theme {
    pub const ORDER: [Theme; 4] = [Theme::Default, Theme::Pastel, Theme::Peach, Theme::Forest];

    /// Next theme in presentation order, wrapping.
    pub fn next(self) -> Theme {
        let i = Self::ORDER.iter().position(|t| *t == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn colors(self) -> ThemeSpec {
        match self {
            Theme::Default => ThemeSpec::new(0xD9D9D9, 0x000000, 0xF6D0E3),
            Theme::Pastel => ThemeSpec::new(0x464B9A, 0xF6D0E3, 0xDA624F),
            Theme::Peach => ThemeSpec::new(0xEFEFEF, 0xDA624F, 0x2A5744),
            Theme::Forest => ThemeSpec::new(0xFBECAF, 0x2A5744, 0xD9D9D9),
        }
    }
}

/// Script mode: controls every displayed string and the font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptMode {
    #[default]
    Hiragana,
    Kanji,
    English,
}

impl ScriptMode {
    pub const ORDER: [ScriptMode; 3] =
        [ScriptMode::Hiragana, ScriptMode::Kanji, ScriptMode::English];

    pub fn next(self) -> ScriptMode {
        let i = Self::ORDER.iter().position(|m| *m == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn font_family(self) -> FontFamily {
        match self {
            ScriptMode::English => FontFamily::Latin,
            _ => FontFamily::Cjk,
        }
    }

    /// Glyph shown on the mode button while this mode is active.
    pub fn button_glyph(self) -> &'static str {
        match self {
            ScriptMode::Hiragana => "あ",
            ScriptMode::Kanji => "漢",
            ScriptMode::English => "A",
        }
    }
}

/// Measurement system for the fact-card tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn toggled(self) -> UnitSystem {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Latin,
    Cjk,
}

impl FontFamily {
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Latin => "Inter",
            FontFamily::Cjk => "Noto Sans JP",
        }
    }
}

/// Per-viewport bundle of label strings with aligned positions and
/// rotations. The three slices are index-aligned 1:1:1.
#[derive(Debug, Clone, Copy)]
pub struct LabelGroup {
    pub texts: &'static [&'static str],
    pub positions: &'static [[f32; 3]],
    pub rotations: &'static [[f32; 2]],
}

impl LabelGroup {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = LabelPlacement> + '_ {
        (0..self.len()).map(|i| LabelPlacement {
            text: self.texts[i],
            position: self.positions[i],
            rotation: self.rotations[i],
        })
    }
}

/// One label with its placement, as yielded by [`LabelGroup::entries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub text: &'static str,
    pub position: [f32; 3],
    pub rotation: [f32; 2],
}

// Rotations shared by every mode's orientation group: front faces the
// camera, back is flipped, sides and caps are quarter turns.
const ORIENT_ROTATIONS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [PI, 0.0],
    [FRAC_PI_2, 0.0],
    [-FRAC_PI_2, 0.0],
    [0.0, FRAC_PI_2],
    [0.0, -FRAC_PI_2],
];

const NO_ROTATION_2: [[f32; 2]; 2] = [[0.0, 0.0], [0.0, 0.0]];

const HIRAGANA_GROUPS: [LabelGroup; VIEWPORT_COUNT] = [
    LabelGroup {
        texts: &["なか", "そと"],
        positions: &[[0.0, 0.0, 0.0], [0.0, 0.57, 0.0]],
        rotations: &NO_ROTATION_2,
    },
    LabelGroup {
        texts: &["まえ", "うしろ", "みぎ", "ひだり", "うえ", "した"],
        positions: &[
            [0.0, 0.0, 0.61],
            [0.0, 0.0, -0.67],
            [0.62, 0.0, 0.0],
            [-0.67, 0.0, 0.0],
            [0.0, 0.57, 0.0],
            [0.0, -0.56, 0.0],
        ],
        rotations: &ORIENT_ROTATIONS,
    },
    LabelGroup {
        texts: &["あいだ", "まわり"],
        positions: &[[0.0, 0.0, 0.0], [0.67, 0.0, 0.0]],
        rotations: &NO_ROTATION_2,
    },
];

const KANJI_GROUPS: [LabelGroup; VIEWPORT_COUNT] = [
    LabelGroup {
        texts: &["中", "外"],
        positions: &[[0.0, 0.0, 0.0], [0.0, 0.58, 0.0]],
        rotations: &NO_ROTATION_2,
    },
    LabelGroup {
        texts: &["前", "後ろ", "右", "左", "上", "下"],
        positions: &[
            [0.0, 0.0, 0.58],
            [0.0, 0.0, -0.62],
            [0.58, 0.0, 0.0],
            [-0.58, 0.0, 0.0],
            [0.0, 0.58, 0.0],
            [0.0, -0.57, 0.0],
        ],
        rotations: &ORIENT_ROTATIONS,
    },
    LabelGroup {
        texts: &["間", "周り"],
        positions: &[[0.0, 0.0, 0.0], [0.63, 0.0, 0.0]],
        rotations: &NO_ROTATION_2,
    },
];

const ENGLISH_GROUPS: [LabelGroup; VIEWPORT_COUNT] = [
    LabelGroup {
        texts: &["Inside", "Outside"],
        positions: &[[0.0, 0.0, 0.0], [0.0, 0.57, 0.0]],
        rotations: &NO_ROTATION_2,
    },
    LabelGroup {
        texts: &["Front", "Back", "Right", "Left", "Top", "Bottom"],
        positions: &[
            [0.0, 0.0, 0.65],
            [0.0, 0.0, -0.64],
            [0.64, 0.0, 0.0],
            [-0.61, 0.0, 0.0],
            [0.0, 0.58, 0.0],
            [0.0, -0.57, 0.0],
        ],
        rotations: &ORIENT_ROTATIONS,
    },
    LabelGroup {
        texts: &["Between", "Around"],
        positions: &[[0.0, 0.0, 0.0], [0.7, 0.0, 0.0]],
        rotations: &NO_ROTATION_2,
    },
];

/// All label groups for a mode, ordered by viewport slot.
pub fn label_groups(mode: ScriptMode) -> &'static [LabelGroup; VIEWPORT_COUNT] {
    match mode {
        ScriptMode::Hiragana => &HIRAGANA_GROUPS,
        ScriptMode::Kanji => &KANJI_GROUPS,
        ScriptMode::English => &ENGLISH_GROUPS,
    }
}

pub fn label_group(mode: ScriptMode, slot: usize) -> &'static LabelGroup {
    debug_assert!(slot < VIEWPORT_COUNT, "viewport slot out of range: {slot}");
    &label_groups(mode)[slot]
}

/// Model resource per viewport slot, relative to the asset root.
pub fn model_path(slot: usize) -> &'static str {
    debug_assert!(slot < VIEWPORT_COUNT, "viewport slot out of range: {slot}");
    ["models/boolean.obj", "models/cube.obj", "models/plane.obj"][slot]
}

/// One fact card: resting text/value and the hover replacement pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactCardSpec {
    pub text: &'static str,
    pub value: &'static str,
    pub hover_text: &'static str,
    pub hover_value: &'static str,
}

const fn card(
    text: &'static str,
    value: &'static str,
    hover_text: &'static str,
    hover_value: &'static str,
) -> FactCardSpec {
    FactCardSpec {
        text,
        value,
        hover_text,
        hover_value,
    }
}

const HIRAGANA_METRIC_CARDS: [FactCardSpec; 3] = [
    card("おもい", "50キロ", "かるい", "1キロ"),
    card("おそい", "2キロメートル", "はやい", "60キロメートル"),
    card("おっきい", "200センチ", "ちいさい", "10センチ"),
];

const HIRAGANA_IMPERIAL_CARDS: [FactCardSpec; 3] = [
    card("おもい", "110ポンド", "かるい", "2ポンド"),
    card("おそい", "1マイル", "はやい", "37マイル"),
    card("おっきい", "79インチ", "ちいさい", "4インチ"),
];

const KANJI_METRIC_CARDS: [FactCardSpec; 3] = [
    card("重い", "50キロ", "軽い", "1キロ"),
    card("遅い", "2キロメートル", "速い", "60キロメートル"),
    card("大きい", "200センチ", "小さい", "10センチ"),
];

const KANJI_IMPERIAL_CARDS: [FactCardSpec; 3] = [
    card("重い", "110ポンド", "軽い", "2ポンド"),
    card("遅い", "1マイル", "速い", "37マイル"),
    card("大きい", "79インチ", "小さい", "4インチ"),
];

const ENGLISH_METRIC_CARDS: [FactCardSpec; 3] = [
    card("Heavy", "50 Kilograms", "Light", "1 Kilograms"),
    card("Slow", "2 Km/h", "Fast", "60 Km/h"),
    card("Big", "200 Centimeters", "Small", "10 Centimeters"),
];

const ENGLISH_IMPERIAL_CARDS: [FactCardSpec; 3] = [
    card("Heavy", "110 Pounds", "Light", "2 Pounds"),
    card("Slow", "1 Mph", "Fast", "37 Mph"),
    card("Big", "79 Inches", "Small", "4 Inches"),
];

/// The three fact cards for a (mode, unit system) pair: weight, speed, size.
pub fn fact_cards(mode: ScriptMode, units: UnitSystem) -> &'static [FactCardSpec; 3] {
    match (mode, units) {
        (ScriptMode::Hiragana, UnitSystem::Metric) => &HIRAGANA_METRIC_CARDS,
        (ScriptMode::Hiragana, UnitSystem::Imperial) => &HIRAGANA_IMPERIAL_CARDS,
        (ScriptMode::Kanji, UnitSystem::Metric) => &KANJI_METRIC_CARDS,
        (ScriptMode::Kanji, UnitSystem::Imperial) => &KANJI_IMPERIAL_CARDS,
        (ScriptMode::English, UnitSystem::Metric) => &ENGLISH_METRIC_CARDS,
        (ScriptMode::English, UnitSystem::Imperial) => &ENGLISH_IMPERIAL_CARDS,
    }
}

/// Welcome-section greeting for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeSpec {
    pub text: &'static str,
    pub family: FontFamily,
}

pub fn welcome(mode: ScriptMode) -> WelcomeSpec {
    match mode {
        ScriptMode::Hiragana => WelcomeSpec {
            text: "こんにちは",
            family: FontFamily::Cjk,
        },
        ScriptMode::Kanji => WelcomeSpec {
            text: "今日は",
            family: FontFamily::Cjk,
        },
        ScriptMode::English => WelcomeSpec {
            text: "Hello",
            family: FontFamily::Latin,
        },
    }
}

/// Menu entry labels for a mode, one per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLabels {
    pub welcome: &'static str,
    pub geometry: &'static str,
    pub physics: &'static str,
}

pub fn menu_labels(mode: ScriptMode) -> MenuLabels {
    match mode {
        ScriptMode::Hiragana => MenuLabels {
            welcome: "こんにちは 👋",
            geometry: "きかがく 📐",
            physics: "ぶつりがく 🧪",
        },
        ScriptMode::Kanji => MenuLabels {
            welcome: "今日は 👋",
            geometry: "幾何学 📐",
            physics: "物理学 🧪",
        },
        ScriptMode::English => MenuLabels {
            welcome: "Hello 👋",
            geometry: "Geometry 📐",
            physics: "Physics 🧪",
        },
    }
}
