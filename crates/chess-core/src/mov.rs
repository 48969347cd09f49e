//! Move representation.

use crate::{CastleSide, Color, Piece, PieceKind, Square};
use std::fmt;

/// What a move does beyond relocating the moving piece.
///
/// Every consumer matches on this exhaustively; there are no optional side
/// fields to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move to an empty square.
    Quiet,
    /// Capture of the piece standing on the destination.
    Capture { captured: Piece },
    /// Pawn capture onto the en-passant target; the captured pawn stands on
    /// `captured_square`, not on the destination.
    EnPassant { captured_square: Square },
    /// King castles; the paired rook moves from `rook_from` to `rook_to`.
    Castle {
        side: CastleSide,
        rook_from: Square,
        rook_to: Square,
    },
    /// Pawn reaches its last rank. `promote_to` is `None` until the caller
    /// picks the new piece.
    Promotion {
        captured: Option<Piece>,
        promote_to: Option<PieceKind>,
    },
}

/// A chess move: a proposal until it passes the legality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub kind: MoveKind,
}

impl Move {
    /// Creates a move.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            piece,
            kind,
        }
    }

    /// The color making the move.
    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    /// The piece removed from the board by this move, if any.
    pub const fn captured(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture { captured } => Some(captured),
            MoveKind::EnPassant { .. } => {
                Some(Piece::new(PieceKind::Pawn, self.piece.color.opposite()))
            }
            MoveKind::Promotion { captured, .. } => captured,
            MoveKind::Quiet | MoveKind::Castle { .. } => None,
        }
    }

    /// Returns true if this move removes an enemy piece.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured().is_some()
    }

    /// Returns true for promotions, with or without a chosen piece.
    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    /// The chosen promotion piece.
    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promote_to, .. } => promote_to,
            _ => None,
        }
    }

    /// Castle side, if this is a castling move.
    #[inline]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castle { side, .. } => Some(side),
            _ => None,
        }
    }

    /// Returns a copy of a promotion move with the promotion piece filled in.
    /// Non-promotion moves come back unchanged.
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        match self.kind {
            MoveKind::Promotion { captured, .. } => Move {
                kind: MoveKind::Promotion {
                    captured,
                    promote_to: Some(kind),
                },
                ..self
            },
            _ => self,
        }
    }

    /// The caller-level intent that selects this move.
    pub const fn intent(&self) -> MoveIntent {
        MoveIntent {
            from: self.from,
            to: self.to,
            promotion: self.promotion(),
        }
    }

    /// Coordinate notation (e.g., "e2e4", "e7e8q").
    pub fn to_uci(&self) -> String {
        self.intent().to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.intent())
    }
}

/// What a user asks for: a from/to pair plus an optional promotion piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveIntent {
    /// Creates an intent without a promotion piece.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveIntent {
            from,
            to,
            promotion: None,
        }
    }

    /// Sets the promotion piece.
    #[inline]
    pub const fn promoting_to(self, kind: PieceKind) -> Self {
        MoveIntent {
            promotion: Some(kind),
            ..self
        }
    }

    /// Parses coordinate notation such as "g1f3" or "e7e8q".
    ///
    /// Only checks the syntax; legality is decided against a position.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => {
                let kind = PieceKind::from_letter(c)?;
                if !kind.is_promotion_target() {
                    return None;
                }
                Some(kind)
            }
            None => None,
        };
        Some(MoveIntent {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn captured_piece_by_kind() {
        let white_pawn = Piece::new(PieceKind::Pawn, Color::White);
        let black_knight = Piece::new(PieceKind::Knight, Color::Black);

        let quiet = Move::new(sq("e2"), sq("e4"), white_pawn, MoveKind::Quiet);
        assert_eq!(quiet.captured(), None);

        let capture = Move::new(
            sq("e4"),
            sq("d5"),
            white_pawn,
            MoveKind::Capture {
                captured: black_knight,
            },
        );
        assert_eq!(capture.captured(), Some(black_knight));

        let ep = Move::new(
            sq("e5"),
            sq("d6"),
            white_pawn,
            MoveKind::EnPassant {
                captured_square: sq("d5"),
            },
        );
        assert_eq!(
            ep.captured(),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(ep.is_capture());
    }

    #[test]
    fn promotion_choice() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let m = Move::new(
            sq("a7"),
            sq("a8"),
            pawn,
            MoveKind::Promotion {
                captured: None,
                promote_to: None,
            },
        );
        assert!(m.is_promotion());
        assert_eq!(m.promotion(), None);
        assert_eq!(m.to_uci(), "a7a8");

        let q = m.with_promotion(PieceKind::Queen);
        assert_eq!(q.promotion(), Some(PieceKind::Queen));
        assert_eq!(q.to_uci(), "a7a8q");

        let quiet = Move::new(sq("e2"), sq("e3"), pawn, MoveKind::Quiet);
        assert_eq!(quiet.with_promotion(PieceKind::Queen), quiet);
    }

    #[test]
    fn intent_from_uci() {
        let m = MoveIntent::from_uci("e2e4").unwrap();
        assert_eq!(m, MoveIntent::new(sq("e2"), sq("e4")));

        let promo = MoveIntent::from_uci("e7e8N").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Knight));
        assert_eq!(promo.to_string(), "e7e8n");

        assert!(MoveIntent::from_uci("invalid").is_none());
        assert!(MoveIntent::from_uci("e2e9").is_none());
        assert!(MoveIntent::from_uci("e7e8k").is_none());
        assert!(MoveIntent::from_uci("e7e8p").is_none());
        assert!(MoveIntent::from_uci("e2").is_none());
        assert!(MoveIntent::from_uci("e2e4qq").is_none());
    }

    #[test]
    fn castle_side_accessor() {
        let king = Piece::new(PieceKind::King, Color::Black);
        let m = Move::new(
            Square::E8,
            Square::C8,
            king,
            MoveKind::Castle {
                side: CastleSide::Queenside,
                rook_from: Square::A8,
                rook_to: Square::D8,
            },
        );
        assert_eq!(m.castle_side(), Some(CastleSide::Queenside));
        assert!(!m.is_capture());
        assert_eq!(format!("{}", m), "e8c8");
    }
}
