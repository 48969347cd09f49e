//! Core types for chess.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`CastlingRights`] and [`CastleSide`]
//! - [`Move`], [`MoveKind`] and [`MoveIntent`] for move representation
//! - FEN parsing and serialization via [`FenFields`]

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{FenDefect, FenFields, MalformedFen, Placement};
pub use mov::{Move, MoveIntent, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::{ParseSquareError, Square};
