//! PGN movetext rendering.
//!
//! Moves are written as `"<n>. <white> <black> "` pairs. A line that starts
//! with Black to move opens with `"<n>... <black> "`.

use chess_core::Color;

use crate::rules::GameStatus;

/// Renders SAN moves as numbered movetext.
///
/// `first_fullmove` and `first_side` describe the position the first move
/// is played from. Every move is followed by a single space.
///
/// ```
/// use chess_core::Color;
/// use chess_engine::pgn::movetext;
///
/// let text = movetext(&["e4", "e5", "Nf3"], 1, Color::White);
/// assert_eq!(text, "1. e4 e5 2. Nf3 ");
/// ```
pub fn movetext<S: AsRef<str>>(sans: &[S], first_fullmove: u32, first_side: Color) -> String {
    let mut text = String::new();
    let mut fullmove = first_fullmove;
    let mut side = first_side;

    for (i, san) in sans.iter().enumerate() {
        match side {
            Color::White => text.push_str(&format!("{}. ", fullmove)),
            Color::Black if i == 0 => text.push_str(&format!("{}... ", fullmove)),
            Color::Black => {}
        }
        text.push_str(san.as_ref());
        text.push(' ');

        if side == Color::Black {
            fullmove = fullmove.saturating_add(1);
        }
        side = side.opposite();
    }
    text
}

/// Movetext followed by the result token, as it ends a PGN game.
pub fn with_result(movetext: &str, status: GameStatus) -> String {
    format!("{}{}", movetext, status.result_token())
}
