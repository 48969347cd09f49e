//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"

use chess_core::{CastleSide, Move, MoveKind, PieceKind, Square};
use thiserror::Error;

use crate::legality::legal_moves;
use crate::rules::is_in_check;
use crate::Position;

/// Rendered for a move that does not fit the position at all.
pub const MALFORMED: &str = "??";

/// Rendered for a well-formed move that is not legal here.
pub const NOT_LEGAL: &str = "?";

/// Error type for SAN parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    /// The SAN string is empty.
    #[error("empty SAN string")]
    Empty,
    /// The SAN string has invalid format.
    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),
    /// No legal move matches the SAN.
    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),
    /// Multiple legal moves match the SAN.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
    /// A pawn reaches its last rank but the SAN names no promotion piece.
    #[error("promotion piece required: {san}")]
    MissingPromotion {
        san: String,
        from: Square,
        to: Square,
    },
}

/// Converts a move to SAN given the position BEFORE the move and the legal
/// moves of that position.
///
/// Never fails: a move whose piece does not match the board, whose color is
/// not on move, or whose promotion piece is missing renders as `??`; a
/// well-formed move absent from `legal` renders as `?`.
pub fn move_to_san(position: &Position, m: &Move, legal: &[Move]) -> String {
    if position.piece_at(m.from) != Some(m.piece)
        || m.color() != position.side_to_move
        || (m.is_promotion() && m.promotion().is_none())
    {
        return MALFORMED.to_string();
    }
    if !legal.iter().any(|l| same_move(l, m)) {
        return NOT_LEGAL.to_string();
    }

    let mut san = String::new();
    match m.kind {
        MoveKind::Castle { side, .. } => san.push_str(side.san()),
        _ => {
            if m.piece.kind != PieceKind::Pawn {
                san.push(m.piece.kind.letter());
            }
            let disambiguation = disambiguation(m, legal);
            san.push_str(&disambiguation);
            if m.is_capture() {
                if m.piece.kind == PieceKind::Pawn && disambiguation.is_empty() {
                    san.push(m.from.file_char());
                }
                san.push('x');
            }
            san.push_str(&m.to.to_algebraic());
            if let Some(kind) = m.promotion() {
                san.push('=');
                san.push(kind.letter());
            }
        }
    }

    add_check_suffix(position, m, san)
}

/// Parses a SAN string and returns the corresponding legal move, with the
/// promotion piece filled in for promotions.
pub fn san_to_move(position: &Position, san: &str) -> Result<Move, SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }

    // Check/mate markers and annotation glyphs carry no move information.
    let bare = san.trim_end_matches(['+', '#', '!', '?']);

    let legal = legal_moves(position);

    if let Some(side) = castle_side(bare) {
        return legal
            .into_iter()
            .find(|m| m.castle_side() == Some(side))
            .ok_or_else(|| SanError::NoMatchingMove(san.to_string()));
    }

    let parsed = parse_san_components(bare)?;

    let candidates: Vec<&Move> = legal
        .iter()
        .filter(|m| {
            m.piece.kind == parsed.piece
                && m.to == parsed.to_square
                && m.castle_side().is_none()
                && parsed.from_file.map_or(true, |f| m.from.file() == f)
                && parsed.from_rank.map_or(true, |r| m.from.rank() == r)
                && (!parsed.is_capture || m.is_capture())
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        [m] => match (m.is_promotion(), parsed.promotion) {
            (true, Some(kind)) => Ok(m.with_promotion(kind)),
            (true, None) => Err(SanError::MissingPromotion {
                san: san.to_string(),
                from: m.from,
                to: m.to,
            }),
            (false, Some(_)) => Err(SanError::NoMatchingMove(san.to_string())),
            (false, None) => Ok(**m),
        },
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

/// Parsed components of a SAN string.
#[derive(Debug)]
struct ParsedSan {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to_square: Square,
    promotion: Option<PieceKind>,
    is_capture: bool,
}

fn castle_side(san: &str) -> Option<CastleSide> {
    match san {
        "O-O" | "0-0" => Some(CastleSide::Kingside),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queenside),
        _ => None,
    }
}

fn parse_san_components(san: &str) -> Result<ParsedSan, SanError> {
    let invalid = |what: &str| SanError::InvalidFormat(format!("{}: {}", what, san));

    let mut rest = san;

    let piece = match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            rest = &rest[1..];
            PieceKind::from_letter(c).ok_or_else(|| invalid("invalid piece character"))?
        }
        Some(_) => PieceKind::Pawn,
        None => return Err(SanError::Empty),
    };

    let promotion = match rest.split_once('=') {
        Some((head, tail)) => {
            let mut chars = tail.chars();
            let kind = match (chars.next(), chars.next()) {
                (Some(c), None) => PieceKind::from_letter(c)
                    .filter(|k| k.is_promotion_target())
                    .ok_or_else(|| invalid("invalid promotion piece"))?,
                _ => return Err(invalid("invalid promotion")),
            };
            rest = head;
            Some(kind)
        }
        None => None,
    };

    if rest.len() < 2 || !rest.is_ascii() {
        return Err(invalid("too short"));
    }
    let (head, dest) = rest.split_at(rest.len() - 2);
    let to_square = Square::from_algebraic(dest).ok_or_else(|| invalid("invalid destination"))?;

    let (head, is_capture) = match head.strip_suffix('x') {
        Some(head) => (head, true),
        None => (head, false),
    };

    let (from_file, from_rank) =
        parse_disambiguation(head).ok_or_else(|| invalid("invalid disambiguation"))?;

    Ok(ParsedSan {
        piece,
        from_file,
        from_rank,
        to_square,
        promotion,
        is_capture,
    })
}

/// Splits an origin hint ("", "b", "1", "b1") into file and rank indices.
fn parse_disambiguation(s: &str) -> Option<(Option<u8>, Option<u8>)> {
    let file = |c: char| ('a'..='h').contains(&c).then(|| c as u8 - b'a');
    let rank = |c: char| ('1'..='8').contains(&c).then(|| c as u8 - b'1');

    let chars: Vec<char> = s.chars().collect();
    match chars.as_slice() {
        [] => Some((None, None)),
        [c] => match (file(*c), rank(*c)) {
            (Some(f), _) => Some((Some(f), None)),
            (None, Some(r)) => Some((None, Some(r))),
            (None, None) => None,
        },
        [f, r] => Some((Some(file(*f)?), Some(rank(*r)?))),
        _ => None,
    }
}

/// Equality up to the promotion choice; legal lists carry promotions with
/// no piece chosen.
fn same_move(legal: &Move, m: &Move) -> bool {
    legal.from == m.from
        && legal.to == m.to
        && legal.piece == m.piece
        && match (legal.kind, m.kind) {
            (
                MoveKind::Promotion { captured: a, .. },
                MoveKind::Promotion { captured: b, .. },
            ) => a == b,
            (a, b) => a == b,
        }
}

/// The minimal origin hint that separates `m` from other legal moves of the
/// same piece to the same square: file, else rank, else the full square.
fn disambiguation(m: &Move, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|o| o.piece == m.piece && o.to == m.to && o.from != m.from)
        .map(|o| o.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != m.from.file()) {
        m.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != m.from.rank()) {
        m.from.rank_char().to_string()
    } else {
        m.from.to_algebraic()
    }
}

fn add_check_suffix(position: &Position, m: &Move, mut san: String) -> String {
    let next = position.apply(m);
    if is_in_check(&next) {
        if legal_moves(&next).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}
