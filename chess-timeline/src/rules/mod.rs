//! Adapter over `cozy-chess`: move application, notation and game-end
//! predicates. Positions are `cozy_chess::Board` values and serialize to FEN.

pub mod helpers;
pub mod notation;

use std::fmt;

use cozy_chess::util::display_uci_move;
use cozy_chess::{Board, Color, Move, Piece};
use thiserror::Error;

use crate::record::{color_name, MoveKind, MoveRecord};
use helpers::{captured_piece, insufficient_material, legal_moves, move_is_castle};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("illegal or unrecognized move: {0}")]
    IllegalMove(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

/// State of the current position. Colors name the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    ToMove(Color),
    Check(Color),
    Checkmate(Color),
    Stalemate,
    Draw(DrawReason),
}

impl Status {
    /// Evaluates `board`, the last entry of `history`. Repetitions are
    /// counted over `history`.
    pub fn of(board: &Board, history: &[Board]) -> Self {
        let side = board.side_to_move();
        let in_check = !board.checkers().is_empty();

        if legal_moves(board).is_empty() {
            return if in_check { Status::Checkmate(side) } else { Status::Stalemate };
        }
        if board.halfmove_clock() >= 100 {
            return Status::Draw(DrawReason::FiftyMoveRule);
        }
        let repetitions = history
            .iter()
            .filter(|earlier| earlier.same_position(board))
            .count();
        if repetitions >= 3 {
            return Status::Draw(DrawReason::ThreefoldRepetition);
        }
        if insufficient_material(board) {
            return Status::Draw(DrawReason::InsufficientMaterial);
        }

        if in_check { Status::Check(side) } else { Status::ToMove(side) }
    }

    pub fn is_game_over(&self) -> bool {
        !matches!(self, Status::ToMove(_) | Status::Check(_))
    }

    /// PGN result token.
    pub fn result(&self) -> &'static str {
        match self {
            Status::Checkmate(Color::White) => "0-1",
            Status::Checkmate(Color::Black) => "1-0",
            Status::Stalemate | Status::Draw(_) => "1/2-1/2",
            Status::ToMove(_) | Status::Check(_) => "*",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::ToMove(side) => write!(f, "{} to move.", color_name(*side)),
            Status::Check(side) => write!(f, "{} is in check.", color_name(*side)),
            Status::Checkmate(side) => write!(f, "Game over! {} is in checkmate.", color_name(*side)),
            Status::Stalemate => write!(f, "Game over! Stalemate."),
            Status::Draw(DrawReason::FiftyMoveRule) => write!(f, "Game over! Draw by the fifty-move rule."),
            Status::Draw(DrawReason::ThreefoldRepetition) => write!(f, "Game over! Draw by threefold repetition."),
            Status::Draw(DrawReason::InsufficientMaterial) => write!(f, "Game over! Draw by insufficient material."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rules {
    board: Board,
}

impl Rules {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Applies a move given as SAN or UCI text.
    pub fn apply(&mut self, input: &str) -> Result<(MoveRecord, Board), RulesError> {
        let mv = notation::parse_move(&self.board, input)
            .ok_or_else(|| RulesError::IllegalMove(input.trim().to_owned()))?;
        self.apply_move(mv)
    }

    pub fn apply_move(&mut self, mv: Move) -> Result<(MoveRecord, Board), RulesError> {
        if !self.board.is_legal(mv) {
            return Err(RulesError::IllegalMove(mv.to_string()));
        }

        let record = describe(&self.board, mv);
        self.board.play_unchecked(mv);
        Ok((record, self.board.clone()))
    }

    /// Jumps to `snapshot` without replaying moves.
    pub fn restore(&mut self, snapshot: &Board) {
        self.board = snapshot.clone();
    }
}

pub fn parse_fen(fen: &str) -> Result<Board, RulesError> {
    fen.trim().parse::<Board>().map_err(|err| RulesError::InvalidFen {
        fen: fen.to_owned(),
        reason: format!("{err:?}"),
    })
}

/// Builds the record of a legal move played from `board`.
pub fn describe(board: &Board, mv: Move) -> MoveRecord {
    let piece = board.piece_on(mv.from).expect("missing piece?");
    let captured = captured_piece(board, mv);
    let kind = if move_is_castle(board, mv) {
        MoveKind::Castle
    } else if mv.promotion.is_some() {
        MoveKind::Promotion
    } else if captured.is_some() {
        MoveKind::Capture
    } else {
        MoveKind::Normal
    };
    let san = notation::san(board, mv);

    MoveRecord {
        mv,
        check: san.ends_with(['+', '#']),
        uci: display_uci_move(board, mv).to_string(),
        san,
        color: board.side_to_move(),
        piece,
        kind,
        captured,
        promotion: mv.promotion.filter(|_| piece == Piece::Pawn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(rules: &mut Rules, moves: &[&str]) -> Vec<Board> {
        let mut history = vec![rules.board().clone()];
        for mv in moves {
            let (_, snapshot) = rules.apply(mv).unwrap();
            history.push(snapshot);
        }
        history
    }

    #[test]
    fn records_describe_the_move() {
        let mut rules = Rules::new(Board::default());
        let (record, snapshot) = rules.apply("e2e4").unwrap();
        assert_eq!(record.san, "e4");
        assert_eq!(record.uci, "e2e4");
        assert_eq!(record.color, Color::White);
        assert_eq!(record.kind, MoveKind::Normal);
        assert_eq!(&snapshot, rules.board());
        assert_eq!(rules.side_to_move(), Color::Black);
    }

    #[test]
    fn castle_record_uses_standard_uci() {
        let mut rules = Rules::new(parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap());
        let (record, _) = rules.apply("O-O").unwrap();
        assert_eq!(record.kind, MoveKind::Castle);
        assert_eq!(record.uci, "e1g1");
    }

    #[test]
    fn rejects_illegal_moves_without_changing_the_position() {
        let mut rules = Rules::new(Board::default());
        let before = rules.board().clone();
        assert_eq!(rules.apply("e2e5"), Err(RulesError::IllegalMove("e2e5".into())));
        assert_eq!(rules.board(), &before);
    }

    #[test]
    fn restore_jumps_without_replay() {
        let mut rules = Rules::new(Board::default());
        let start = rules.board().clone();
        rules.apply("e4").unwrap();
        rules.restore(&start);
        assert_eq!(rules.board(), &start);
    }

    #[test]
    fn detects_checkmate() {
        let mut rules = Rules::new(Board::default());
        let history = play_all(&mut rules, &["f3", "e5", "g4", "Qh4#"]);
        let status = Status::of(rules.board(), &history);
        assert_eq!(status, Status::Checkmate(Color::White));
        assert_eq!(status.to_string(), "Game over! White is in checkmate.");
        assert_eq!(status.result(), "0-1");
    }

    #[test]
    fn detects_stalemate() {
        let board = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(Status::of(&board, &[board.clone()]), Status::Stalemate);
    }

    #[test]
    fn detects_threefold_repetition() {
        let mut rules = Rules::new(Board::default());
        let history = play_all(
            &mut rules,
            &["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1", "Ng8"],
        );
        assert_eq!(
            Status::of(rules.board(), &history),
            Status::Draw(DrawReason::ThreefoldRepetition)
        );
        assert_eq!(Status::of(rules.board(), &history[..5]), Status::ToMove(Color::White));
    }

    #[test]
    fn reports_check() {
        let mut rules = Rules::new(Board::default());
        let history = play_all(&mut rules, &["e4", "f6", "Qh5+"]);
        let status = Status::of(rules.board(), &history);
        assert!(!rules.board().checkers().is_empty());
        assert_eq!(legal_moves(rules.board()).len(), 1);
        assert_eq!(status, Status::Check(Color::Black));
        assert_eq!(status.to_string(), "Black is in check.");
        assert!(!status.is_game_over());
    }

    #[test]
    fn rejects_bad_fen() {
        assert!(matches!(parse_fen("not a fen"), Err(RulesError::InvalidFen { .. })));
    }
}
