//! Process-wide UI state, owned by the viewer controller.
//!
//! One explicit struct, single writer (the host event handlers); the
//! synchronizer and the card controller read it by reference.

use crate::registry::{ScriptMode, Theme, UnitSystem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub mode: ScriptMode,
    pub theme: Theme,
    pub units: UnitSystem,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next script mode, returning the new one.
    pub fn cycle_mode(&mut self) -> ScriptMode {
        self.mode = self.mode.next();
        self.mode
    }

    /// Advance to the next theme, returning the new one.
    pub fn cycle_theme(&mut self) -> Theme {
        self.theme = self.theme.next();
        self.theme
    }

    /// Flip the unit system, returning the new one.
    pub fn toggle_units(&mut self) -> UnitSystem {
        self.units = self.units.toggled();
        self.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_state() {
        let s = UiState::new();
        assert_eq!(s.mode, ScriptMode::Hiragana);
        assert_eq!(s.theme, Theme::Default);
        assert_eq!(s.units, UnitSystem::Metric);
    }

    #[test]
    fn cycles_return_the_new_value() {
        let mut s = UiState::new();
        assert_eq!(s.cycle_mode(), ScriptMode::Kanji);
        assert_eq!(s.cycle_theme(), Theme::Pastel);
        assert_eq!(s.toggle_units(), UnitSystem::Imperial);
        assert_eq!(s.toggle_units(), UnitSystem::Metric);
    }
}
