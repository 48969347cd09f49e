//! Full game management with history tracking.
//!
//! The [`Game`] struct owns everything the rules need beyond a single
//! position: the snapshot history for undo, the position keys for
//! repetition, the SAN record, a resignation, and the advisory config.
//! Positions are never mutated in place; every move appends a new snapshot.

use chess_core::{Color, MalformedFen, Move, MoveIntent, Square};
use thiserror::Error;
use tracing::debug;

use crate::config::EngineConfig;
use crate::legality::{legal_destinations, legal_moves, legal_moves_from};
use crate::pgn;
use crate::position::{Position, PositionKey};
use crate::rules::{self, GameStatus};
use crate::san::{move_to_san, san_to_move, SanError};

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    /// The move, with its promotion piece resolved.
    pub mov: Move,
    /// SAN notation for the move.
    pub san: String,
}

/// What the caller gets back for an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The position after the move.
    pub position: Position,
    /// SAN notation for the move.
    pub san: String,
    /// Status of the game after the move.
    pub status: GameStatus,
}

/// Error type for move submission. A rejected move leaves the game as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The from/to pair is not a legal move for the side to move.
    #[error("illegal move: {from}{to}")]
    Illegal { from: Square, to: Square },
    /// A pawn reaches its last rank but no promotion piece was given.
    #[error("promotion piece required for {from}{to}")]
    PromotionRequired { from: Square, to: Square },
    /// A promotion piece was given where none applies, or names a pawn or
    /// king.
    #[error("invalid promotion for {from}{to}")]
    InvalidPromotion { from: Square, to: Square },
    /// The game has already ended.
    #[error("game is over: {0}")]
    GameOver(GameStatus),
    /// The SAN string could not be resolved.
    #[error("invalid SAN: {0}")]
    Notation(#[from] SanError),
}

/// A complete chess game with history tracking.
///
/// Unlike [`Position`], which represents a single board state, `Game` keeps
/// the whole line played from its starting position.
#[derive(Debug, Clone)]
pub struct Game {
    config: EngineConfig,
    /// Starting position.
    start: Position,
    /// Snapshot after each move; the last one is current.
    positions: Vec<Position>,
    /// Keys of the start position and of every snapshot.
    keys: Vec<PositionKey>,
    moves: Vec<GameMove>,
    /// The side that resigned.
    resigned: Option<Color>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Game {
            config: EngineConfig::default(),
            keys: vec![position.key()],
            start: position,
            positions: Vec::new(),
            moves: Vec::new(),
            resigned: None,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, MalformedFen> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Replaces the advisory configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The advisory configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        self.positions.last().unwrap_or(&self.start)
    }

    /// Returns the starting position.
    pub fn start_position(&self) -> &Position {
        &self.start
    }

    /// Returns the move history.
    pub fn moves(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.position())
    }

    /// Destination squares for the piece on `from`, for move highlighting.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        legal_destinations(self.position(), from)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        rules::is_in_check(self.position())
    }

    /// Current status, derived from the position and its history.
    pub fn status(&self) -> GameStatus {
        match self.resigned {
            Some(loser) => GameStatus::Resigned {
                winner: loser.opposite(),
            },
            None => rules::evaluate(self.position(), &self.keys),
        }
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.status().is_terminal()
    }

    /// The winning side, once the game is decided.
    pub fn winner(&self) -> Option<Color> {
        self.status().winner()
    }

    /// How many times the current position has occurred.
    pub fn position_count(&self) -> usize {
        rules::repetition_count(&self.keys, &self.position().key())
    }

    /// Advisory: the fifty-move rule is getting close.
    pub fn fifty_move_warning(&self) -> bool {
        rules::fifty_move_warning(self.position(), self.config.fifty_move_warning)
    }

    /// Advisory: a position is repeating.
    pub fn repetition_warning(&self) -> bool {
        rules::repetition_warning(&self.keys, self.config.repetition_warning)
    }

    /// Returns the current position as a FEN string.
    pub fn fen(&self) -> String {
        self.position().to_fen()
    }

    /// Numbered SAN movetext of the game so far.
    pub fn movetext(&self) -> String {
        let sans: Vec<&str> = self.moves.iter().map(|m| m.san.as_str()).collect();
        pgn::movetext(
            &sans,
            self.start.fullmove_number,
            self.start.side_to_move,
        )
    }

    /// Movetext terminated by the result token.
    pub fn pgn(&self) -> String {
        pgn::with_result(&self.movetext(), self.status())
    }

    /// Plays a move given as from/to plus optional promotion piece.
    pub fn play(&mut self, intent: MoveIntent) -> Result<MoveOutcome, MoveError> {
        self.ensure_running()?;
        let m = self.resolve(intent).map_err(|e| {
            debug!(%intent, error = %e, "rejected move intent");
            e
        })?;
        Ok(self.commit(m))
    }

    /// Plays a move given in SAN notation.
    pub fn play_san(&mut self, san: &str) -> Result<MoveOutcome, MoveError> {
        self.ensure_running()?;
        let m = san_to_move(self.position(), san).map_err(|e| {
            debug!(san, error = %e, "rejected SAN move");
            match e {
                SanError::MissingPromotion { from, to, .. } => {
                    MoveError::PromotionRequired { from, to }
                }
                other => MoveError::Notation(other),
            }
        })?;
        Ok(self.commit(m))
    }

    /// Takes back the last move. Returns `None` at the starting position.
    ///
    /// A resignation is not a move and is left in place.
    pub fn undo(&mut self) -> Option<GameMove> {
        let undone = self.moves.pop()?;
        self.positions.pop();
        self.keys.pop();
        debug!(san = %undone.san, fen = %self.fen(), "took back move");
        Some(undone)
    }

    /// Records that `color` resigns.
    pub fn resign(&mut self, color: Color) -> Result<GameStatus, MoveError> {
        self.ensure_running()?;
        self.resigned = Some(color);
        let status = self.status();
        debug!(%status, "game ended by resignation");
        Ok(status)
    }

    fn ensure_running(&self) -> Result<(), MoveError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(MoveError::GameOver(status));
        }
        Ok(())
    }

    /// Matches an intent against the legal moves of the piece on its
    /// origin and fills in the promotion piece.
    fn resolve(&self, intent: MoveIntent) -> Result<Move, MoveError> {
        let MoveIntent {
            from,
            to,
            promotion,
        } = intent;
        let m = legal_moves_from(self.position(), from)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(MoveError::Illegal { from, to })?;

        match (m.is_promotion(), promotion) {
            (true, None) => Err(MoveError::PromotionRequired { from, to }),
            (true, Some(kind)) if kind.is_promotion_target() => Ok(m.with_promotion(kind)),
            (false, None) => Ok(m),
            _ => Err(MoveError::InvalidPromotion { from, to }),
        }
    }

    /// Appends a legal move to the history.
    fn commit(&mut self, m: Move) -> MoveOutcome {
        let before = self.status();
        let position = self.position();
        let san = move_to_san(position, &m, &legal_moves(position));
        let next = position.apply(&m);

        self.keys.push(next.key());
        self.positions.push(next.clone());
        self.moves.push(GameMove {
            mov: m,
            san: san.clone(),
        });

        let status = self.status();
        debug!(san = %san, fen = %next.to_fen(), "applied move");
        if status != before {
            debug!(from = %before, to = %status, "status changed");
        }

        MoveOutcome {
            position: next,
            san,
            status,
        }
    }
}
