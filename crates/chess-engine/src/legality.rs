//! Legality filter.
//!
//! A pseudo-legal move is legal when, played out on a scratch copy of the
//! board, it does not leave the mover's own king attacked. The live board
//! is never touched, so speculative checks need no undo.

use chess_core::{Color, Move, Square};

use crate::movegen::{attacks_square, pseudo_legal_moves, pseudo_legal_moves_for, GenContext};
use crate::{Board, Position};

/// Returns true if playing `m` on `board` leaves the mover's king safe.
///
/// A side without a king has nothing to expose, so every move passes.
pub fn keeps_king_safe(board: &Board, m: &Move) -> bool {
    let color = m.color();
    let mut scratch = board.clone();
    scratch.apply(m);
    match scratch.king_square(color) {
        Some(king) => !attacks_square(&scratch, king, color.opposite()),
        None => true,
    }
}

/// Returns true if the piece of `color` on `from` may legally move to `to`.
pub fn is_legal(board: &Board, from: Square, to: Square, color: Color, ctx: &GenContext) -> bool {
    match board.get(from) {
        Some(piece) if piece.color == color => pseudo_legal_moves(piece, from, board, ctx)
            .iter()
            .any(|m| m.to == to && keeps_king_safe(board, m)),
        _ => false,
    }
}

/// All legal moves of the side to move.
///
/// Promotions appear once per from/to pair with no piece chosen.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let ctx = position.gen_context();
    let mut moves = pseudo_legal_moves_for(&position.board, position.side_to_move, &ctx);
    moves.retain(|m| keeps_king_safe(&position.board, m));
    moves
}

/// Legal moves of the piece on `from`. Empty if the square is empty or
/// holds a piece of the side not to move.
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    match position.piece_at(from) {
        Some(piece) if piece.color == position.side_to_move => {
            let mut moves =
                pseudo_legal_moves(piece, from, &position.board, &position.gen_context());
            moves.retain(|m| keeps_king_safe(&position.board, m));
            moves
        }
        _ => Vec::new(),
    }
}

/// Destination squares reachable from `from`, for move highlighting.
pub fn legal_destinations(position: &Position, from: Square) -> Vec<Square> {
    legal_moves_from(position, from)
        .into_iter()
        .map(|m| m.to)
        .collect()
}
