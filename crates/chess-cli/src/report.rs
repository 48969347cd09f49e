//! Text and JSON rendering of a finished command.

use chess_core::Color;
use chess_engine::{Game, GameStatus};
use serde::Serialize;

/// One played move.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MoveRecord {
    /// Coordinate notation (e.g., "e7e8q").
    pub uci: String,
    pub san: String,
}

/// JSON representation of a game after `play`.
#[derive(Debug, Serialize)]
pub struct PlayReport {
    /// Position the moves were played from.
    pub start_fen: String,
    pub fen: String,
    /// Status in words, e.g. "checkmate, Black wins".
    pub status: String,
    /// "white", "black", or absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<&'static str>,
    pub movetext: String,
    pub pgn: String,
    pub moves: Vec<MoveRecord>,
    pub fifty_move_warning: bool,
    pub repetition_warning: bool,
}

impl PlayReport {
    pub fn from_game(game: &Game) -> Self {
        let status = game.status();
        PlayReport {
            start_fen: game.start_position().to_fen(),
            fen: game.fen(),
            status: status.to_string(),
            winner: status.winner().map(color_name),
            movetext: game.movetext(),
            pgn: game.pgn(),
            moves: game
                .moves()
                .iter()
                .map(|m| MoveRecord {
                    uci: m.mov.to_uci(),
                    san: m.san.clone(),
                })
                .collect(),
            fifty_move_warning: game.fifty_move_warning(),
            repetition_warning: game.repetition_warning(),
        }
    }

    /// Human-readable rendering, one fact per line.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Start: {}", self.start_fen),
            format!("FEN: {}", self.fen),
            format!("Status: {}", self.status),
            format!("PGN: {}", self.pgn),
        ];
        if self.fifty_move_warning {
            lines.push("Warning: fifty-move rule approaching".to_string());
        }
        if self.repetition_warning {
            lines.push("Warning: position repeating".to_string());
        }
        lines.join("\n")
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Short status line used by the `moves` command.
pub fn status_line(status: GameStatus, legal_count: usize) -> String {
    format!("{} legal moves, {}", legal_count, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_for_fools_mate() {
        let mut game = Game::new();
        for san in ["f3", "e5", "g4", "Qh4"] {
            game.play_san(san).unwrap();
        }
        let report = PlayReport::from_game(&game);
        assert_eq!(report.status, "checkmate, Black wins");
        assert_eq!(report.winner, Some("black"));
        assert_eq!(report.pgn, "1. f3 e5 2. g4 Qh4# 0-1");
        assert_eq!(
            report.moves[3],
            MoveRecord {
                uci: "d8h4".to_string(),
                san: "Qh4#".to_string()
            }
        );

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["winner"], "black");
        assert_eq!(json["moves"].as_array().unwrap().len(), 4);
        assert_eq!(json["fifty_move_warning"], false);
    }

    #[test]
    fn winner_omitted_while_running() {
        let report = PlayReport::from_game(&Game::new());
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("winner"));
        assert_eq!(report.pgn, "*");
    }

    #[test]
    fn text_lists_warnings() {
        let mut game = Game::new();
        for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            game.play_san(san).unwrap();
        }
        let text = PlayReport::from_game(&game).to_text();
        let start = "Start: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n";
        assert!(text.starts_with(start));
        assert!(text.contains("FEN: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 4 3"));
        assert!(text.contains("Status: active"));
        assert!(text.contains("Warning: position repeating"));
        assert!(!text.contains("fifty-move"));
    }

    #[test]
    fn start_fen_follows_custom_start() {
        let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
        let mut game = Game::from_fen(fen).unwrap();
        game.play_san("O-O").unwrap();
        let report = PlayReport::from_game(&game);
        assert_eq!(report.start_fen, fen);
        assert_eq!(report.fen, "4k3/8/8/8/8/8/8/5RK1 b - - 1 1");
        assert_eq!(report.pgn, "1. O-O *");
    }

    #[test]
    fn status_line_format() {
        assert_eq!(
            status_line(GameStatus::Check, 3),
            "3 legal moves, check"
        );
    }
}
