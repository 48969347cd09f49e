//! 8x8 mailbox board.

use chess_core::{Color, Move, MoveKind, Piece, PieceKind, Placement, Square};

/// Piece placement on an 8x8 grid, rank-major.
///
/// An empty square is `None`. Squares off the board cannot be expressed,
/// since every [`Square`] is valid by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: Placement,
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Builds a board from a decoded FEN placement.
    pub const fn from_placement(squares: Placement) -> Self {
        Board { squares }
    }

    /// The underlying grid, indexed `[rank][file]`.
    pub const fn placement(&self) -> &Placement {
        &self.squares
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub const fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    #[inline]
    pub const fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Places `piece` on `sq`, returning whatever stood there.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize].replace(piece)
    }

    /// Clears `sq`, returning whatever stood there.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize].take()
    }

    /// Iterates occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterates the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Locates the king of `color`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|(_, piece)| *piece == king)
            .map(|(sq, _)| sq)
    }

    /// Performs the piece relocation of `m`, including the captured pawn of
    /// an en-passant capture, the paired rook of a castle, and the promoted
    /// piece.
    ///
    /// No rule checking happens here. A promotion without a chosen piece
    /// leaves the pawn on its last rank, which is enough for king-safety
    /// probes.
    pub fn apply(&mut self, m: &Move) {
        self.remove(m.from);
        match m.kind {
            MoveKind::Quiet | MoveKind::Capture { .. } => {
                self.put(m.to, m.piece);
            }
            MoveKind::EnPassant { captured_square } => {
                self.remove(captured_square);
                self.put(m.to, m.piece);
            }
            MoveKind::Castle {
                rook_from, rook_to, ..
            } => {
                self.put(m.to, m.piece);
                if let Some(rook) = self.remove(rook_from) {
                    self.put(rook_to, rook);
                }
            }
            MoveKind::Promotion { promote_to, .. } => {
                let kind = promote_to.unwrap_or(PieceKind::Pawn);
                self.put(m.to, Piece::new(kind, m.piece.color));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
