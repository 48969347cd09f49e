//! Attack detection.
//!
//! A single primitive, [`attacks_square`], answers "does this color attack
//! that square"; check detection, castling-path safety and king-move
//! validation all go through it.

use chess_core::{Color, PieceKind, Square};

use super::{pseudo_legal_moves, GenContext};
use crate::Board;

/// The two squares a pawn of `color` on `from` attacks (off-board ones are
/// `None`).
#[inline]
pub fn pawn_attack_squares(from: Square, color: Color) -> [Option<Square>; 2] {
    let dir = color.pawn_direction();
    [from.offset(-1, dir), from.offset(1, dir)]
}

/// Returns true if any piece of `by` attacks `square`.
///
/// Pawns attack their two forward diagonals whether or not anything stands
/// there. Every other piece attacks the destinations of its pseudo-legal
/// moves, generated with castling suppressed so that castling's own safety
/// check cannot recurse. `square` must not hold a piece of `by`.
pub fn attacks_square(board: &Board, square: Square, by: Color) -> bool {
    let probe = GenContext::attack_probe();
    board.pieces_of(by).any(|(from, piece)| match piece.kind {
        PieceKind::Pawn => pawn_attack_squares(from, by).contains(&Some(square)),
        _ => pseudo_legal_moves(piece, from, board, &probe)
            .iter()
            .any(|m| m.to == square),
    })
}

/// Returns true if the king of `color` is attacked. A board without that
/// king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| attacks_square(board, king, color.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        Position::from_fen(fen).unwrap().board
    }

    #[test]
    fn startpos_attacks() {
        let b = Position::startpos().board;
        assert!(attacks_square(&b, sq("e3"), Color::White));
        assert!(attacks_square(&b, sq("f3"), Color::White));
        assert!(!attacks_square(&b, sq("e4"), Color::White));
        assert!(attacks_square(&b, sq("c6"), Color::Black));
        assert!(!attacks_square(&b, sq("e5"), Color::Black));
    }

    #[test]
    fn pawn_attacks_diagonals_not_pushes() {
        let b = board("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1");
        assert!(attacks_square(&b, sq("d1"), Color::Black));
        assert!(attacks_square(&b, sq("f1"), Color::Black));
        assert!(!attacks_square(&b, sq("e1"), Color::Black));
    }

    #[test]
    fn sliders_blocked() {
        let b = board("4k3/8/8/8/r2P3K/8/8/8 w - - 0 1");
        assert!(attacks_square(&b, sq("c4"), Color::Black));
        assert!(attacks_square(&b, sq("d4"), Color::Black));
        assert!(!attacks_square(&b, sq("h4"), Color::Black));
    }

    #[test]
    fn pawn_attack_squares_at_edge() {
        assert_eq!(
            pawn_attack_squares(sq("a2"), Color::White),
            [None, Some(sq("b3"))]
        );
        assert_eq!(
            pawn_attack_squares(sq("h7"), Color::Black),
            [Some(sq("g6")), None]
        );
    }

    #[test]
    fn check_detection() {
        assert!(!is_in_check(&Position::startpos().board, Color::White));
        let b = board("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(is_in_check(&b, Color::White));
        assert!(!is_in_check(&b, Color::Black));
        assert!(!is_in_check(&Board::empty(), Color::White));
    }
}
