//! Fact cards with animated value transitions.
//!
//! Each card shows a text/value pair and swaps to a hover pair while the
//! pointer rests on it. The numeric part of the value tweens linearly in
//! fixed 20 ms frames over 200 ms; the non-numeric remainder of the
//! destination string is the unit suffix. One animation handle exists per
//! card: starting a new transition cancels the old one and continues from
//! the currently displayed value, so rapid hover flapping never jitters.

use crate::registry::{fact_cards, FactCardSpec, ScriptMode, UnitSystem};

pub const CARD_COUNT: usize = 3;
/// Milliseconds per animation frame.
pub const FRAME_MS: u32 = 20;
/// Milliseconds per value transition.
pub const TRANSITION_MS: u32 = 200;
const TOTAL_FRAMES: u32 = TRANSITION_MS / FRAME_MS;

/// What a host should render for one card right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFace {
    pub text: &'static str,
    pub value: String,
}

struct ValueAnimation {
    end: f32,
    increment: f32,
    frames_left: u32,
}

struct CardState {
    hovered: bool,
    shown: f32,
    suffix: &'static str,
    animation: Option<ValueAnimation>,
}

impl CardState {
    fn resting(spec: &FactCardSpec) -> Self {
        Self {
            hovered: false,
            shown: leading_number(spec.value),
            suffix: unit_suffix(spec.value),
            animation: None,
        }
    }

    fn animate_to(&mut self, destination: &'static str) {
        let end = leading_number(destination);
        self.suffix = unit_suffix(destination);
        self.animation = Some(ValueAnimation {
            end,
            increment: (end - self.shown) / TOTAL_FRAMES as f32,
            frames_left: TOTAL_FRAMES,
        });
    }

    fn step(&mut self) {
        if let Some(anim) = self.animation.as_mut() {
            self.shown += anim.increment;
            anim.frames_left -= 1;
            if anim.frames_left == 0 {
                // Land exactly on the destination.
                self.shown = anim.end;
                self.animation = None;
            }
        }
    }
}

/// Drives the three fact cards for the current mode and unit system.
pub struct FactCardController {
    specs: &'static [FactCardSpec; CARD_COUNT],
    cards: [CardState; CARD_COUNT],
    accumulated_ms: u32,
}

impl FactCardController {
    pub fn new(mode: ScriptMode, units: UnitSystem) -> Self {
        let specs = fact_cards(mode, units);
        Self {
            specs,
            cards: [
                CardState::resting(&specs[0]),
                CardState::resting(&specs[1]),
                CardState::resting(&specs[2]),
            ],
            accumulated_ms: 0,
        }
    }

    /// Swap the card data after a mode or unit change. Cards snap to their
    /// new resting values; in-flight animations and hover states drop.
    pub fn refresh(&mut self, mode: ScriptMode, units: UnitSystem) {
        *self = Self::new(mode, units);
    }

    pub fn hover_start(&mut self, index: usize) {
        debug_assert!(index < CARD_COUNT);
        let spec = &self.specs[index];
        let card = &mut self.cards[index];
        if card.hovered {
            return;
        }
        card.hovered = true;
        card.animate_to(spec.hover_value);
    }

    pub fn hover_end(&mut self, index: usize) {
        debug_assert!(index < CARD_COUNT);
        let spec = &self.specs[index];
        let card = &mut self.cards[index];
        if !card.hovered {
            return;
        }
        card.hovered = false;
        card.animate_to(spec.value);
    }

    /// Advance animations by wall-clock milliseconds, stepping in whole
    /// frames and carrying the remainder.
    pub fn advance_by(&mut self, elapsed_ms: u32) {
        self.accumulated_ms += elapsed_ms;
        while self.accumulated_ms >= FRAME_MS {
            self.accumulated_ms -= FRAME_MS;
            for card in &mut self.cards {
                card.step();
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.cards.iter().any(|card| card.animation.is_some())
    }

    pub fn face(&self, index: usize) -> CardFace {
        debug_assert!(index < CARD_COUNT);
        let spec = &self.specs[index];
        let card = &self.cards[index];
        CardFace {
            text: if card.hovered {
                spec.hover_text
            } else {
                spec.text
            },
            value: format!("{}{}", card.shown.round() as i64, card.suffix),
        }
    }
}

/// Leading numeric portion of a value string, `parseFloat` style.
fn leading_number(value: &str) -> f32 {
    let end = value
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit() && *ch != '.' && *ch != '-')
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().unwrap_or(0.0)
}

/// Everything in the destination string that is not a digit.
fn unit_suffix(value: &str) -> &str {
    value.trim_start_matches(|ch: char| ch.is_ascii_digit() || ch == '.' || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_start_at_their_resting_values() {
        let cards = FactCardController::new(ScriptMode::Hiragana, UnitSystem::Metric);
        assert_eq!(cards.face(0).text, "おもい");
        assert_eq!(cards.face(0).value, "50キロ");
        assert_eq!(cards.face(2).value, "200センチ");
    }

    #[test]
    fn hover_tweens_in_ten_frames_and_lands_exactly() {
        let mut cards = FactCardController::new(ScriptMode::Hiragana, UnitSystem::Metric);
        cards.hover_start(0);
        assert_eq!(cards.face(0).text, "かるい");

        let mut steps = 0;
        while cards.is_animating() {
            cards.advance_by(FRAME_MS);
            steps += 1;
            assert!(steps <= TOTAL_FRAMES);
        }
        assert_eq!(steps, TOTAL_FRAMES);
        assert_eq!(cards.face(0).value, "1キロ");
    }

    #[test]
    fn interrupted_hover_continues_from_the_shown_value() {
        let mut cards = FactCardController::new(ScriptMode::Hiragana, UnitSystem::Metric);
        cards.hover_start(0);
        cards.advance_by(3 * FRAME_MS);
        // Part way from 50 toward 1.
        let mid: f32 = 50.0 + 3.0 * (1.0 - 50.0) / TOTAL_FRAMES as f32;
        assert_eq!(cards.face(0).value, format!("{}キロ", mid.round() as i64));

        cards.hover_end(0);
        cards.advance_by(TRANSITION_MS);
        assert!(!cards.is_animating());
        assert_eq!(cards.face(0).text, "おもい");
        assert_eq!(cards.face(0).value, "50キロ");
    }

    #[test]
    fn refresh_snaps_to_the_new_unit_system() {
        let mut cards = FactCardController::new(ScriptMode::English, UnitSystem::Metric);
        cards.hover_start(1);
        cards.refresh(ScriptMode::English, UnitSystem::Imperial);
        assert!(!cards.is_animating());
        assert_eq!(cards.face(1).value, "1 Mph");
        assert_eq!(cards.face(1).text, "Slow");
    }

    #[test]
    fn suffix_follows_the_destination_string() {
        let mut cards = FactCardController::new(ScriptMode::English, UnitSystem::Metric);
        cards.hover_start(0);
        cards.advance_by(FRAME_MS);
        assert!(cards.face(0).value.ends_with(" Kilograms"));
    }

    #[test]
    fn repeated_hover_start_does_not_restart_the_tween() {
        let mut cards = FactCardController::new(ScriptMode::Hiragana, UnitSystem::Metric);
        cards.hover_start(0);
        cards.advance_by(5 * FRAME_MS);
        let before = cards.face(0).value;
        cards.hover_start(0);
        assert_eq!(cards.face(0).value, before);
    }
}
