//! Chess position representation.

use std::fmt;

use chess_core::{
    CastlingRights, Color, FenFields, MalformedFen, Move, MoveKind, Piece, PieceKind, Square,
};

use crate::movegen::GenContext;
use crate::Board;

/// Complete chess position state.
///
/// Positions are values: applying a move derives a new `Position` and
/// leaves the old one untouched, so a game history is a plain sequence of
/// snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece placement.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

/// The rules-relevant identity of a position: the FEN without its two
/// move counters.
///
/// Two positions with equal keys are the same position for repetition
/// purposes regardless of move-count bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(String);

impl PositionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let fields = FenFields::parse(FenFields::STARTPOS).expect("STARTPOS is valid");
        Self::from_fields(fields)
    }

    /// Decodes a position from a FEN string.
    ///
    /// Only structural validity is checked; the position itself may be
    /// unreachable.
    pub fn from_fen(fen: &str) -> Result<Self, MalformedFen> {
        FenFields::parse(fen).map(Self::from_fields)
    }

    fn from_fields(fields: FenFields) -> Self {
        Position {
            board: Board::from_placement(fields.placement),
            side_to_move: fields.side_to_move,
            castling: fields.castling,
            en_passant: fields.en_passant,
            halfmove_clock: fields.halfmove_clock,
            fullmove_number: fields.fullmove_number,
        }
    }

    /// Encodes the position as a FEN string.
    pub fn to_fen(&self) -> String {
        FenFields {
            placement: *self.board.placement(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// The repetition key of this position.
    pub fn key(&self) -> PositionKey {
        let fen = self.to_fen();
        let reduced: Vec<&str> = fen.split(' ').take(4).collect();
        PositionKey(reduced.join(" "))
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Generation context derived from this position's auxiliary state.
    pub fn gen_context(&self) -> GenContext {
        GenContext::for_position(self)
    }

    /// Applies a move and returns the resulting position.
    ///
    /// The move is assumed to be legal here; run it through the legality
    /// filter first.
    pub fn apply(&self, m: &Move) -> Position {
        let us = m.piece.color;
        let mut next = self.clone();
        next.board.apply(m);

        if m.piece.kind == PieceKind::King {
            next.castling.remove_color(us);
        }
        if m.piece.kind == PieceKind::Rook {
            next.castling.remove_for_rook_square(m.from);
        }
        if let MoveKind::Capture { captured }
        | MoveKind::Promotion {
            captured: Some(captured),
            ..
        } = m.kind
        {
            if captured.kind == PieceKind::Rook {
                next.castling.remove_for_rook_square(m.to);
            }
        }

        next.en_passant = if m.piece.kind == PieceKind::Pawn
            && m.from.rank().abs_diff(m.to.rank()) == 2
        {
            m.from.offset(0, us.pawn_direction())
        } else {
            None
        };

        if m.piece.kind == PieceKind::Pawn || m.is_capture() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }

        if us == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = us.opposite();
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legality::legal_moves;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn find(position: &Position, from: &str, to: &str) -> Move {
        legal_moves(position)
            .into_iter()
            .find(|m| m.from == sq(from) && m.to == sq(to))
            .unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenFields::STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn malformed_fen_is_reported() {
        let err =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").unwrap_err();
        assert_eq!(err.fen, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1");
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(
            pos.piece_at(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
    }

    #[test]
    fn key_ignores_counters() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 37 60").unwrap();
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().as_str(), "4k3/8/8/8/8/8/8/4K2R w K -");

        let c = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b K - 0 1").unwrap();
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn double_push_sets_en_passant() {
        let pos = Position::startpos();
        let next = pos.apply(&find(&pos, "e2", "e4"));
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.en_passant, Some(sq("e3")));
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
        assert_eq!(
            next.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        // The source snapshot is untouched.
        assert_eq!(pos.to_fen(), FenFields::STARTPOS);
    }

    #[test]
    fn counters_advance() {
        let pos = Position::startpos();
        let pos = pos.apply(&find(&pos, "g1", "f3"));
        assert_eq!(pos.halfmove_clock, 1);
        assert_eq!(pos.fullmove_number, 1);
        let pos = pos.apply(&find(&pos, "g8", "f6"));
        assert_eq!(pos.halfmove_clock, 2);
        assert_eq!(pos.fullmove_number, 2);
        assert_eq!(pos.en_passant, None);
    }

    #[test]
    fn counters_saturate_at_max() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap();
        let next = pos.apply(&find(&pos, "e8", "d8"));
        assert_eq!(next.fullmove_number, u32::MAX);
        assert_eq!(next.halfmove_clock, 1);

        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1").unwrap();
        let next = pos.apply(&find(&pos, "e1", "d1"));
        assert_eq!(next.halfmove_clock, u32::MAX);
        assert_eq!(next.to_fen(), "4k3/8/8/8/8/8/8/3K4 b - - 4294967295 1");
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let pos = Position::from_fen("4k3/8/8/3p4/8/8/8/3RK3 w - - 17 30").unwrap();
        let next = pos.apply(&find(&pos, "d1", "d5"));
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn king_move_drops_both_rights() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = pos.apply(&find(&pos, "e1", "f1"));
        assert_eq!(next.castling.to_fen(), "kq");
    }

    #[test]
    fn rook_move_drops_one_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = pos.apply(&find(&pos, "a1", "a5"));
        assert_eq!(next.castling.to_fen(), "Kkq");
    }

    #[test]
    fn capturing_rook_on_corner_drops_its_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = pos.apply(&find(&pos, "h1", "h8"));
        assert_eq!(next.castling.to_fen(), "Qq");
    }
}
