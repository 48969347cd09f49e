//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions count once per promotion piece, as in the published tables.

use chess_core::{Move, PieceKind};

use crate::legality::legal_moves;
use crate::Position;

/// Expands unresolved promotions into one move per promotion piece.
pub(crate) fn expand_promotions(moves: Vec<Move>) -> Vec<Move> {
    let mut out = Vec::with_capacity(moves.len());
    for m in moves {
        if m.is_promotion() && m.promotion().is_none() {
            out.extend(PieceKind::PROMOTIONS.iter().map(|&kind| m.with_promotion(kind)));
        } else {
            out.push(m);
        }
    }
    out
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = expand_promotions(legal_moves(position));

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&position.apply(m), depth - 1))
        .sum()
}

/// Perft with divide: node count below each root move, sorted by move.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = expand_promotions(legal_moves(position));
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&position.apply(m), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
