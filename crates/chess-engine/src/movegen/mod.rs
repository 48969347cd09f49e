//! Pseudo-legal move generation.
//!
//! Moves produced here obey piece movement patterns and board occupancy but
//! are not checked for leaving the mover's own king attacked; that is the
//! job of [`crate::legality`]. Castling is the exception: it validates its
//! own path against attacks, because it is both a king move and a compound
//! board change.

mod attacks;
pub mod perft;

use chess_core::{CastleSide, CastlingRights, Color, Move, MoveKind, Piece, PieceKind, Square};

use crate::{Board, Position};

pub use attacks::{attacks_square, is_in_check, pawn_attack_squares};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Whether king move generation may emit castling candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingMoves {
    Generate,
    /// Used while generating purely for attack detection, which castling
    /// itself depends on.
    Suppress,
}

/// Position state that move generation needs beyond piece placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenContext {
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
    pub castling_moves: CastlingMoves,
}

impl GenContext {
    /// Context for generating the real moves of a position.
    pub fn for_position(position: &Position) -> Self {
        GenContext {
            en_passant: position.en_passant,
            castling: position.castling,
            castling_moves: CastlingMoves::Generate,
        }
    }

    /// Context for attack probes: no en passant, no castling.
    pub const fn attack_probe() -> Self {
        GenContext {
            en_passant: None,
            castling: CastlingRights::NONE,
            castling_moves: CastlingMoves::Suppress,
        }
    }
}

/// Generates the pseudo-legal moves of `piece` standing on `from`.
pub fn pseudo_legal_moves(
    piece: Piece,
    from: Square,
    board: &Board,
    ctx: &GenContext,
) -> Vec<Move> {
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, from, board, ctx, &mut moves),
        PieceKind::Knight => step_moves(piece, from, board, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slide_moves(piece, from, board, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => slide_moves(piece, from, board, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => {
            slide_moves(piece, from, board, &ROOK_DIRECTIONS, &mut moves);
            slide_moves(piece, from, board, &BISHOP_DIRECTIONS, &mut moves);
        }
        PieceKind::King => {
            step_moves(piece, from, board, &KING_OFFSETS, &mut moves);
            if ctx.castling_moves == CastlingMoves::Generate {
                castling_moves(piece, from, board, ctx, &mut moves);
            }
        }
    }
    moves
}

/// Generates the pseudo-legal moves of every piece of `color`.
pub fn pseudo_legal_moves_for(board: &Board, color: Color, ctx: &GenContext) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(from, piece)| pseudo_legal_moves(piece, from, board, ctx))
        .collect()
}

/// Classifies a landing square: `None` if blocked by an own piece.
#[inline]
fn landing(board: &Board, piece: Piece, to: Square) -> Option<MoveKind> {
    match board.get(to) {
        None => Some(MoveKind::Quiet),
        Some(other) if other.color != piece.color => Some(MoveKind::Capture { captured: other }),
        Some(_) => None,
    }
}

fn step_moves(
    piece: Piece,
    from: Square,
    board: &Board,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if let Some(kind) = landing(board, piece, to) {
                moves.push(Move::new(from, to, piece, kind));
            }
        }
    }
}

fn slide_moves(
    piece: Piece,
    from: Square,
    board: &Board,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match landing(board, piece, to) {
                Some(MoveKind::Quiet) => moves.push(Move::new(from, to, piece, MoveKind::Quiet)),
                Some(kind) => {
                    moves.push(Move::new(from, to, piece, kind));
                    break;
                }
                None => break,
            }
            current = to;
        }
    }
}

fn pawn_moves(piece: Piece, from: Square, board: &Board, ctx: &GenContext, moves: &mut Vec<Move>) {
    let color = piece.color;
    let dir = color.pawn_direction();
    let promotes = |to: Square| to.rank() == color.promotion_rank();

    if let Some(one) = from.offset(0, dir).filter(|sq| board.is_empty(*sq)) {
        if promotes(one) {
            moves.push(Move::new(
                from,
                one,
                piece,
                MoveKind::Promotion {
                    captured: None,
                    promote_to: None,
                },
            ));
        } else {
            moves.push(Move::new(from, one, piece, MoveKind::Quiet));
            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, dir).filter(|sq| board.is_empty(*sq)) {
                    moves.push(Move::new(from, two, piece, MoveKind::Quiet));
                }
            }
        }
    }

    for to in pawn_attack_squares(from, color).into_iter().flatten() {
        match board.get(to) {
            Some(target) if target.color != color => {
                let kind = if promotes(to) {
                    MoveKind::Promotion {
                        captured: Some(target),
                        promote_to: None,
                    }
                } else {
                    MoveKind::Capture { captured: target }
                };
                moves.push(Move::new(from, to, piece, kind));
            }
            Some(_) => {}
            None if ctx.en_passant == Some(to) => {
                let enemy_pawn = Piece::new(PieceKind::Pawn, color.opposite());
                if let Some(captured_square) = to.offset(0, -dir) {
                    if board.get(captured_square) == Some(enemy_pawn) {
                        moves.push(Move::new(
                            from,
                            to,
                            piece,
                            MoveKind::EnPassant { captured_square },
                        ));
                    }
                }
            }
            None => {}
        }
    }
}

/// Castling candidates for a king on `from`.
///
/// Requires the right, the king on its home square, the own rook on its
/// corner, every square strictly between them empty, and the king's start,
/// transit and destination squares all free of enemy attack.
fn castling_moves(
    piece: Piece,
    from: Square,
    board: &Board,
    ctx: &GenContext,
    moves: &mut Vec<Move>,
) {
    let color = piece.color;
    let home = Square::new(4, color.back_rank());
    if home != Some(from) {
        return;
    }
    let rook = Piece::new(PieceKind::Rook, color);
    let enemy = color.opposite();

    for side in CastleSide::ALL {
        if !ctx.castling.has(color, side) {
            continue;
        }
        let rook_from = side.rook_origin(color);
        if board.get(rook_from) != Some(rook) {
            continue;
        }
        let rank = color.back_rank();
        let (low, high) = if rook_from.file() < from.file() {
            (rook_from.file(), from.file())
        } else {
            (from.file(), rook_from.file())
        };
        let path_clear = (low + 1..high)
            .filter_map(|file| Square::new(file, rank))
            .all(|sq| board.is_empty(sq));
        if !path_clear {
            continue;
        }

        let target = side.king_target(color);
        let (first, last) = if target.file() < from.file() {
            (target.file(), from.file())
        } else {
            (from.file(), target.file())
        };
        let king_path_safe = (first..=last)
            .filter_map(|file| Square::new(file, rank))
            .all(|sq| !attacks_square(board, sq, enemy));
        if !king_path_safe {
            continue;
        }

        moves.push(Move::new(
            from,
            target,
            piece,
            MoveKind::Castle {
                side,
                rook_from,
                rook_to: side.rook_target(color),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn moves_from(fen: &str, from: &str) -> Vec<Move> {
        let position = Position::from_fen(fen).unwrap();
        let piece = position.piece_at(sq(from)).unwrap();
        pseudo_legal_moves(piece, sq(from), &position.board, &position.gen_context())
    }

    fn targets(moves: &[Move]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|m| m.to.to_string()).collect();
        out.sort();
        out
    }

    #[test]
    fn pawn_single_and_double_advance() {
        let moves = moves_from(chess_core::FenFields::STARTPOS, "e2");
        assert_eq!(targets(&moves), vec!["e3", "e4"]);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Quiet));
    }

    #[test]
    fn pawn_double_advance_needs_both_squares_empty() {
        let moves = moves_from("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());

        let moves = moves_from("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(targets(&moves), vec!["e3"]);
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let moves = moves_from("4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1", "e4");
        assert_eq!(targets(&moves), vec!["d5", "e5"]);
        let capture = moves.iter().find(|m| m.to == sq("d5")).unwrap();
        assert!(matches!(capture.kind, MoveKind::Capture { .. }));
    }

    #[test]
    fn pawn_promotion_is_flagged_without_piece() {
        let moves = moves_from("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7");
        assert_eq!(moves.len(), 2);
        for m in &moves {
            assert!(m.is_promotion());
            assert_eq!(m.promotion(), None);
        }
        let capture = moves.iter().find(|m| m.to == sq("b8")).unwrap();
        assert_eq!(
            capture.captured(),
            Some(Piece::new(PieceKind::Knight, Color::Black))
        );
    }

    #[test]
    fn black_pawn_moves_down() {
        let fen = chess_core::FenFields::STARTPOS.replace(" w ", " b ");
        let moves = moves_from(&fen, "d7");
        assert_eq!(targets(&moves), vec!["d5", "d6"]);
    }

    #[test]
    fn en_passant_only_onto_target() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2";
        let moves = moves_from(fen, "e5");
        let ep = moves
            .iter()
            .find(|m| matches!(m.kind, MoveKind::EnPassant { .. }))
            .unwrap();
        assert_eq!(ep.to, sq("d6"));
        assert_eq!(
            ep.kind,
            MoveKind::EnPassant {
                captured_square: sq("d5")
            }
        );

        let moves = moves_from("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2", "e5");
        assert!(moves
            .iter()
            .all(|m| !matches!(m.kind, MoveKind::EnPassant { .. })));
    }

    #[test]
    fn knight_offsets_respect_edges() {
        let moves = moves_from("4k3/8/8/8/8/8/8/N3K3 w - - 0 1", "a1");
        assert_eq!(targets(&moves), vec!["b3", "c2"]);
    }

    #[test]
    fn knight_split_by_occupancy() {
        let moves = moves_from("4k3/8/8/8/8/1p6/2P5/N3K3 w - - 0 1", "a1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, sq("b3"));
        assert!(moves[0].is_capture());
    }

    #[test]
    fn rook_stops_at_blockers() {
        let moves = moves_from("4k3/8/8/3p4/8/8/3P4/3RK3 w - - 0 1", "d1");
        assert_eq!(targets(&moves), vec!["a1", "b1", "c1"]);

        let moves = moves_from("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1", "d1");
        assert_eq!(
            targets(&moves),
            vec!["a1", "b1", "c1", "d2", "d3", "d4", "d5"]
        );
    }

    #[test]
    fn queen_in_open_center() {
        let moves = moves_from("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1", "d4");
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn bishop_diagonals() {
        let moves = moves_from("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1", "c1");
        assert_eq!(targets(&moves), vec!["a3", "b2", "d2", "e3", "f4", "g5", "h6"]);
    }

    #[test]
    fn king_adjacent_squares() {
        let moves = moves_from("4k3/8/8/8/8/8/8/K7 w - - 0 1", "a1");
        assert_eq!(targets(&moves), vec!["a2", "b1", "b2"]);
    }

    #[test]
    fn castling_candidates_when_clear() {
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1");
        let castles: Vec<_> = moves.iter().filter_map(|m| m.castle_side()).collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.contains(&CastleSide::Kingside));
        assert!(castles.contains(&CastleSide::Queenside));
    }

    #[test]
    fn castling_blocked_by_piece_between() {
        let moves = moves_from("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1", "e1");
        assert!(moves.iter().all(|m| m.castle_side().is_none()));
    }

    #[test]
    fn castling_needs_rights() {
        let moves = moves_from("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1", "e1");
        assert!(moves.iter().all(|m| m.castle_side().is_none()));
    }

    #[test]
    fn castling_through_attacked_square() {
        // The black rook on f8 covers f1, which the king must cross.
        let moves = moves_from("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1");
        let castles: Vec<_> = moves.iter().filter_map(|m| m.castle_side()).collect();
        assert_eq!(castles, vec![CastleSide::Queenside]);
    }

    #[test]
    fn castling_out_of_check() {
        let moves = moves_from("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1", "e1");
        assert!(moves.iter().all(|m| m.castle_side().is_none()));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        // b1 must be empty but only the king's path (e1, d1, c1) must be safe.
        let moves = moves_from("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1");
        assert!(moves
            .iter()
            .any(|m| m.castle_side() == Some(CastleSide::Queenside)));
    }

    #[test]
    fn attack_probe_suppresses_castling() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let king = position.piece_at(Square::E1).unwrap();
        let moves = pseudo_legal_moves(
            king,
            Square::E1,
            &position.board,
            &GenContext::attack_probe(),
        );
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|m| m.castle_side().is_none()));
    }

    #[test]
    fn whole_side_generation() {
        let position = Position::startpos();
        let moves = pseudo_legal_moves_for(&position.board, Color::White, &position.gen_context());
        assert_eq!(moves.len(), 20);
    }
}
