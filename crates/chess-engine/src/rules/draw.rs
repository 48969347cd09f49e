//! Draw rules and their advisory thresholds.
//!
//! The rule functions decide draws. The `*_warning` functions only tell a
//! front end that a draw is getting close; they never end a game.

use std::collections::HashMap;

use crate::position::{Position, PositionKey};

/// Halfmoves without pawn move or capture that draw the game.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Occurrences of one position that draw the game.
pub const REPETITION_LIMIT: usize = 3;

/// Returns true once the halfmove clock reaches 100.
pub fn fifty_move_draw(position: &Position) -> bool {
    position.halfmove_clock >= FIFTY_MOVE_LIMIT
}

/// Returns true if some position key occurs at least three times.
pub fn threefold_repetition(history: &[PositionKey]) -> bool {
    max_multiplicity(history) >= REPETITION_LIMIT
}

/// How often `key` occurs in `history`.
pub fn repetition_count(history: &[PositionKey], key: &PositionKey) -> usize {
    history.iter().filter(|k| *k == key).count()
}

/// Advisory: the clock has reached `threshold` but the rule has not fired.
pub fn fifty_move_warning(position: &Position, threshold: u32) -> bool {
    position.halfmove_clock >= threshold && !fifty_move_draw(position)
}

/// Advisory: some position has been seen `threshold` times but not yet
/// often enough to draw.
pub fn repetition_warning(history: &[PositionKey], threshold: usize) -> bool {
    let max = max_multiplicity(history);
    max >= threshold && max < REPETITION_LIMIT
}

fn max_multiplicity(history: &[PositionKey]) -> usize {
    let mut counts: HashMap<&PositionKey, usize> = HashMap::new();
    for key in history {
        *counts.entry(key).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}
