//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - 8x8 piece placement with move application
//! - [`Position`] - Full game state including castling rights, en passant, clocks
//! - Pseudo-legal move generation and attack detection ([`movegen`])
//! - The legality filter ([`legality`])
//! - Check, mate, stalemate and draw evaluation ([`rules`])
//! - SAN notation parsing and generation ([`san`]) and PGN movetext ([`pgn`])
//! - [`Game`] - Complete game management with history tracking
//!
//! # Architecture
//!
//! Positions are immutable snapshots: applying a move yields a new
//! [`Position`]. Legality is decided by playing each candidate on a scratch
//! copy of the board and checking the mover's king, so querying never
//! disturbs the live state.
//!
//! # Example
//!
//! ```
//! use chess_engine::{legal_moves, Game, GameStatus, Position};
//!
//! // Using Position directly (stateless)
//! let position = Position::startpos();
//! assert_eq!(legal_moves(&position).len(), 20);
//!
//! // Using Game for full game management
//! let mut game = Game::new();
//! game.play_san("e4").unwrap();
//! game.play_san("e5").unwrap();
//! assert_eq!(game.status(), GameStatus::Active);
//! assert_eq!(game.movetext(), "1. e4 e5 ");
//! ```

mod board;
pub mod config;
mod game;
pub mod legality;
pub mod movegen;
pub mod pgn;
mod position;
pub mod rules;
pub mod san;

pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use game::{Game, GameMove, MoveError, MoveOutcome};
pub use legality::{is_legal, legal_destinations, legal_moves, legal_moves_from};
pub use movegen::perft::{perft, perft_divide};
pub use position::{Position, PositionKey};
pub use rules::{evaluate, GameStatus};
pub use san::{move_to_san, san_to_move, SanError};
