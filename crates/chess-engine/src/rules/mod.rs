//! Game state evaluation.
//!
//! Everything here is a pure function of a [`Position`] (plus its key
//! history for repetition). Status is always derived, never stored.

mod draw;

pub use draw::{
    fifty_move_draw, fifty_move_warning, repetition_count, repetition_warning,
    threefold_repetition, FIFTY_MOVE_LIMIT, REPETITION_LIMIT,
};

use std::fmt;

use chess_core::Color;

use crate::legality::legal_moves;
use crate::movegen;
use crate::position::{Position, PositionKey};

/// The state of a game as seen from its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Game in progress, side to move not in check.
    Active,
    /// Game in progress, side to move in check.
    Check,
    /// Side to move is mated.
    Checkmate { winner: Color },
    /// Side to move has no legal move and is not in check.
    Stalemate,
    /// A hundred halfmoves without a pawn move or capture.
    DrawByFiftyMoves,
    /// The same position key occurred three times.
    DrawByRepetition,
    /// One side resigned.
    Resigned { winner: Color },
}

impl GameStatus {
    /// Returns true once no further moves may be played.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active | GameStatus::Check)
    }

    /// The winning side, for decisive results.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } | GameStatus::Resigned { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN result token: `1-0`, `0-1`, `1/2-1/2`, or `*` while running.
    pub const fn result_token(self) -> &'static str {
        match self {
            GameStatus::Active | GameStatus::Check => "*",
            GameStatus::Checkmate { winner } | GameStatus::Resigned { winner } => match winner {
                Color::White => "1-0",
                Color::Black => "0-1",
            },
            GameStatus::Stalemate | GameStatus::DrawByFiftyMoves | GameStatus::DrawByRepetition => {
                "1/2-1/2"
            }
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "active"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawByFiftyMoves => write!(f, "draw by fifty-move rule"),
            GameStatus::DrawByRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::Resigned { winner } => {
                write!(f, "{} resigned, {} wins", winner.opposite(), winner)
            }
        }
    }
}

/// Returns true if the side to move is in check.
pub fn is_in_check(position: &Position) -> bool {
    movegen::is_in_check(&position.board, position.side_to_move)
}

/// In check with no legal move.
pub fn is_checkmate(position: &Position) -> bool {
    is_in_check(position) && legal_moves(position).is_empty()
}

/// Not in check, yet no legal move.
pub fn is_stalemate(position: &Position) -> bool {
    !is_in_check(position) && legal_moves(position).is_empty()
}

/// Derives the status of `position` given the keys of every position of
/// the game so far (current one included).
///
/// Mate and stalemate take precedence over the draw rules, which take
/// precedence over a plain check.
pub fn evaluate(position: &Position, history: &[PositionKey]) -> GameStatus {
    let in_check = is_in_check(position);
    if legal_moves(position).is_empty() {
        return if in_check {
            GameStatus::Checkmate {
                winner: position.side_to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if fifty_move_draw(position) {
        GameStatus::DrawByFiftyMoves
    } else if threefold_repetition(history) {
        GameStatus::DrawByRepetition
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::Active
    }
}
