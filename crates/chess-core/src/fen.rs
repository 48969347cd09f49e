//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{CastlingRights, Color, Piece, Square};
use thiserror::Error;

/// Piece placement grid, indexed `[rank][file]` with rank 0 = rank 1.
pub type Placement = [[Option<Piece>; 8]; 8];

/// A FEN string that is not structurally valid.
///
/// Keeps the complete input so callers can report exactly what they were
/// given.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed FEN {fen:?}: {defect}")]
pub struct MalformedFen {
    pub fen: String,
    pub defect: FenDefect,
}

/// The structural problem found in a FEN string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenDefect {
    #[error("expected 6 fields, got {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} covers {width} files, expected 8")]
    RankWidth { rank: u8, width: u32 },

    #[error("invalid character '{ch}' in rank {rank}")]
    InvalidCharacter { ch: char, rank: u8 },

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    ActiveColor(String),

    #[error("invalid castling rights: '{0}'")]
    Castling(String),

    #[error("invalid en passant square: '{0}'")]
    EnPassant(String),

    #[error("invalid halfmove clock: '{0}'")]
    HalfmoveClock(String),

    #[error("invalid fullmove number: '{0}'")]
    FullmoveNumber(String),
}

/// The six decoded FEN fields.
///
/// Only structure is validated here: a FEN without kings, or with pawns on
/// the back rank, still decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    pub placement: Placement,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Decodes a FEN string.
    pub fn parse(fen: &str) -> Result<Self, MalformedFen> {
        Self::parse_fields(fen).map_err(|defect| MalformedFen {
            fen: fen.to_string(),
            defect,
        })
    }

    fn parse_fields(fen: &str) -> Result<Self, FenDefect> {
        let parts: Vec<&str> = fen.split(' ').collect();
        if parts.len() != 6 {
            return Err(FenDefect::FieldCount(parts.len()));
        }

        let placement = parse_placement(parts[0])?;

        let side_to_move =
            Color::from_fen(parts[1]).ok_or_else(|| FenDefect::ActiveColor(parts[1].to_string()))?;

        let castling = CastlingRights::from_fen(parts[2])
            .ok_or_else(|| FenDefect::Castling(parts[2].to_string()))?;

        let en_passant = parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenDefect::HalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenDefect::FullmoveNumber(parts[5].to_string()))?;

        Ok(FenFields {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Encodes back to a FEN string; the exact inverse of [`FenFields::parse`]
    /// for normalized input.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            encode_placement(&self.placement),
            self.side_to_move.fen_char(),
            self.castling.to_fen(),
            self.en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic()),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn parse_placement(field: &str) -> Result<Placement, FenDefect> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenDefect::RankCount(ranks.len()));
    }

    let mut placement: Placement = [[None; 8]; 8];
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let rank_label = rank as u8 + 1;
        let mut width = 0u32;
        for ch in rank_str.chars() {
            if let Some(run) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                width += run;
            } else if let Some(piece) = Piece::from_fen_char(ch) {
                if let Some(cell) = placement[rank].get_mut(width as usize) {
                    *cell = Some(piece);
                }
                width += 1;
            } else {
                return Err(FenDefect::InvalidCharacter {
                    ch,
                    rank: rank_label,
                });
            }
        }
        if width != 8 {
            return Err(FenDefect::RankWidth {
                rank: rank_label,
                width,
            });
        }
    }
    Ok(placement)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenDefect> {
    if field == "-" {
        return Ok(None);
    }
    match Square::from_algebraic(field) {
        Some(sq) if sq.rank() == 2 || sq.rank() == 5 => Ok(Some(sq)),
        _ => Err(FenDefect::EnPassant(field.to_string())),
    }
}

fn encode_placement(placement: &Placement) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8).rev() {
        let mut empty = 0;
        for cell in placement[rank] {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}
