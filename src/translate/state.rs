//! Translation state carried from one line to the next.

use crate::dialect::{CoordinateMode, InitialState};
use crate::parser::Axis;

/// Effective command, feed rate and position after the last emitted line
///
/// Values are full words, letter included (e.g., "X0.000"). Positions are
/// always absolute, whatever the coordinate mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationState {
    pub mode: CoordinateMode,
    pub last_command: String,
    pub last_feed_rate: String,
    pub last_x: String,
    pub last_y: String,
    pub last_z: String,
}

impl TranslationState {
    /// Fresh state seeded from a dialect's defaults
    pub fn new(initial: &InitialState) -> Self {
        Self {
            mode: initial.mode,
            last_command: initial.command.clone(),
            last_feed_rate: initial.feed_rate.clone(),
            last_x: initial.x.clone(),
            last_y: initial.y.clone(),
            last_z: initial.z.clone(),
        }
    }

    /// Carried-forward word for an axis; `None` for axes without carry-forward
    pub fn position(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => Some(&self.last_x),
            Axis::Y => Some(&self.last_y),
            Axis::Z => Some(&self.last_z),
            _ => None,
        }
    }

    /// Record the position of an axis; ignored for axes without carry-forward
    pub fn set_position(&mut self, axis: Axis, word: String) {
        match axis {
            Axis::X => self.last_x = word,
            Axis::Y => self.last_y = word,
            Axis::Z => self.last_z = word,
            _ => {}
        }
    }

    /// Move an axis by a relative distance
    ///
    /// The sum keeps as many decimals as the more precise operand. Leaves the
    /// position alone when either value is not a number.
    pub fn offset_position(&mut self, axis: Axis, delta: &str) {
        let Some(current) = self.position(axis) else {
            return;
        };
        if let Some(word) = offset_word(current, delta) {
            self.set_position(axis, word);
        }
    }
}

fn offset_word(word: &str, delta: &str) -> Option<String> {
    let letter = word.chars().next()?;
    let base = &word[letter.len_utf8()..];
    let sum = base.parse::<f64>().ok()? + delta.parse::<f64>().ok()?;
    let precision = decimals(base).max(decimals(delta));
    // Adding 0.0 turns -0.0 into 0.0
    Some(format!("{}{:.*}", letter, precision, sum + 0.0))
}

fn decimals(value: &str) -> usize {
    value.split_once('.').map_or(0, |(_, frac)| frac.len())
}
