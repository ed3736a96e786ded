//! A single game between a human and, optionally, an automated opponent.

use std::num::NonZeroUsize;

use cozy_chess::{Board, Color};
use log::{debug, info, warn};
use thiserror::Error;

use crate::engine::{Engine, SearchInfo, SearchLimits};
use crate::opponent::{Opponent, OpponentKind};
use crate::pgn::{write_pgn, PgnHeaders};
use crate::record::{color_name, MoveRecord, SoundCue};
use crate::rules::{describe, parse_fen, Rules, RulesError, Status};
use crate::timeline::{Timeline, TimelineError, DEFAULT_EXCHANGE_SIZE};
use crate::view::{BoardView, Orientation};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Starting position; the standard start when `None`.
    pub start_fen: Option<String>,
    /// The side the human plays. Ignored without an opponent.
    pub human: Color,
    pub opponent: OpponentKind,
    /// Plies undone at once; defaults to 2 with an opponent and 1 without.
    pub exchange_size: Option<NonZeroUsize>,
    pub seed: Option<u64>,
    pub tt_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_fen: None,
            human: Color::White,
            opponent: OpponentKind::Random,
            exchange_size: None,
            seed: None,
            tt_bytes: Engine::DEFAULT_TT_BYTES,
        }
    }
}

impl SessionConfig {
    pub fn exchange_size(&self) -> NonZeroUsize {
        self.exchange_size.unwrap_or(match self.opponent {
            OpponentKind::None => NonZeroUsize::MIN,
            _ => DEFAULT_EXCHANGE_SIZE,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
    #[error("{0}")]
    GameOver(Status),
    #[error("browsing history; return to the live position to move")]
    Browsing,
    #[error("waiting for the opponent's reply")]
    AwaitingReply,
    #[error("no reply is pending")]
    NoReplyPending,
}

/// Result of a human move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Played {
    Moved(MoveRecord),
    /// Held until the opponent has replied.
    Queued,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub reply: MoveRecord,
    /// The queued premove, if it was still legal after the reply.
    pub premove: Option<MoveRecord>,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub best_move: MoveRecord,
    pub info: SearchInfo,
}

pub struct Session<V> {
    config: SessionConfig,
    rules: Rules,
    timeline: Timeline<Board, MoveRecord>,
    opponent: Option<Opponent>,
    analyzer: Option<Engine>,
    view: V,
    orientation: Orientation,
    awaiting_reply: bool,
    premove: Option<String>,
}

impl<V: BoardView> Session<V> {
    pub fn new(config: SessionConfig, view: V) -> Result<Self, SessionError> {
        let initial = match &config.start_fen {
            Some(fen) => parse_fen(fen)?,
            None => Board::default(),
        };
        let opponent = Opponent::new(config.opponent, config.seed, config.tt_bytes);
        let orientation = match opponent {
            Some(_) => Orientation::from(config.human),
            None => Orientation::White,
        };

        let mut session = Self {
            rules: Rules::new(initial.clone()),
            timeline: Timeline::with_exchange_size(initial, config.exchange_size()),
            opponent,
            analyzer: None,
            view,
            orientation,
            awaiting_reply: false,
            premove: None,
            config,
        };
        session.refresh_turn();
        session.render();
        Ok(session)
    }

    /// Plays a human move given as SAN or UCI. While a reply is pending the
    /// move is queued instead, replacing any earlier queued move.
    pub fn play(&mut self, input: &str) -> Result<Played, SessionError> {
        self.ensure_ongoing()?;
        if self.timeline.is_browsing() {
            return Err(SessionError::Browsing);
        }
        if self.awaiting_reply {
            if let Some(replaced) = self.premove.replace(input.trim().to_owned()) {
                debug!("premove {replaced} replaced by {}", input.trim());
            }
            return Ok(Played::Queued);
        }

        let (record, snapshot) = self.rules.apply(input)?;
        Ok(Played::Moved(self.commit(record, snapshot)))
    }

    /// Lets the opponent answer, then plays the queued premove if it is still
    /// legal. Callers decide when (and after what delay) to call this.
    pub fn play_reply(&mut self) -> Result<Reply, SessionError> {
        if !self.awaiting_reply {
            return Err(SessionError::NoReplyPending);
        }
        let opponent = self.opponent.as_mut().ok_or(SessionError::NoReplyPending)?;
        let Some(mv) = opponent.choose(self.timeline.committed()) else {
            self.awaiting_reply = false;
            return Err(SessionError::GameOver(self.status()));
        };

        let (record, snapshot) = self.rules.apply_move(mv)?;
        self.awaiting_reply = false;
        let reply = self.commit(record, snapshot);

        let premove = match self.premove.take() {
            Some(input) if !self.status().is_game_over() => match self.rules.apply(&input) {
                Ok((record, snapshot)) => Some(self.commit(record, snapshot)),
                Err(err) => {
                    warn!("dropping premove: {err}");
                    None
                }
            },
            Some(input) => {
                warn!("dropping premove {input}: game is over");
                None
            }
            None => None,
        };

        Ok(Reply { reply, premove })
    }

    /// Takes back the last exchange. Refused while a reply is pending.
    pub fn undo(&mut self) -> Result<Board, SessionError> {
        if self.awaiting_reply {
            return Err(SessionError::AwaitingReply);
        }
        let active = self.timeline.undo_last_exchange()?.clone();
        self.rules.restore(&active);
        self.premove = None;
        self.refresh_turn();
        info!("took back {} plies", self.timeline.exchange_size());
        self.render();
        Ok(active)
    }

    /// Shows snapshot `(ply + 1) * exchange_size - 1` without changing the
    /// live position.
    pub fn go_to_ply(&mut self, ply: usize) -> Result<Board, SessionError> {
        let active = self.timeline.go_to_ply(ply)?.clone();
        self.render();
        Ok(active)
    }

    pub fn step_back(&mut self) -> Result<Board, SessionError> {
        let active = self.timeline.step_back()?.clone();
        self.render();
        Ok(active)
    }

    pub fn step_forward(&mut self) -> Result<Board, SessionError> {
        let active = self.timeline.step_forward()?.clone();
        self.render();
        Ok(active)
    }

    pub fn return_to_live(&mut self) -> Board {
        let live = self.timeline.return_to_live().clone();
        self.render();
        live
    }

    /// Starts over from the configured starting position.
    pub fn new_game(&mut self) {
        self.timeline.reset();
        self.rules.restore(self.timeline.initial());
        self.restart_common();
    }

    /// Starts over from `fen`.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), SessionError> {
        let initial = parse_fen(fen)?;
        self.timeline.restart(initial.clone());
        self.rules.restore(&initial);
        self.config.start_fen = Some(fen.trim().to_owned());
        self.restart_common();
        Ok(())
    }

    pub fn flip(&mut self) -> Orientation {
        self.orientation = self.orientation.flipped();
        self.render();
        self.orientation
    }

    pub fn status(&self) -> Status {
        Status::of(self.rules.board(), self.timeline.committed())
    }

    /// Best move for the live position according to the built-in search.
    pub fn analyze(&mut self, limits: SearchLimits) -> Option<Analysis> {
        let tt_bytes = self.config.tt_bytes;
        let engine = self.analyzer.get_or_insert_with(|| Engine::new(tt_bytes));
        let info = engine.think(self.timeline.committed(), limits, &mut |_| {})?;
        let best_move = describe(self.rules.board(), info.best_move);
        info!("analysis: best move {} (eval {}, depth {})", best_move.san, info.eval, info.depth);
        Some(Analysis { best_move, info })
    }

    pub fn export_pgn(&self) -> String {
        let human = "Player";
        let computer = self.opponent.as_ref().map_or(human, Opponent::name);
        let (white, black) = match self.config.human {
            Color::White => (human, computer),
            Color::Black => (computer, human),
        };
        let headers = PgnHeaders {
            event: "Casual game",
            white,
            black,
            result: self.status().result(),
        };
        write_pgn(self.timeline.initial(), self.timeline.moves(), &headers)
    }

    /// FEN of the live position.
    pub fn fen(&self) -> String {
        self.rules.board().to_string()
    }

    pub fn last_cue(&self) -> Option<SoundCue> {
        self.timeline.last_move().map(MoveRecord::cue)
    }

    pub fn moves(&self) -> &[MoveRecord] {
        self.timeline.moves()
    }

    pub fn cursor(&self) -> usize {
        self.timeline.cursor()
    }

    pub fn timeline(&self) -> &Timeline<Board, MoveRecord> {
        &self.timeline
    }

    pub fn board(&self) -> &Board {
        self.rules.board()
    }

    pub fn can_undo(&self) -> bool {
        !self.awaiting_reply && self.timeline.can_undo()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn premove(&self) -> Option<&str> {
        self.premove.as_deref()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn commit(&mut self, record: MoveRecord, snapshot: Board) -> MoveRecord {
        debug_assert_eq!(&snapshot, self.rules.board(), "snapshot does not match the live position");
        info!("{} played {}", color_name(record.color), record.san);
        self.timeline.record_move(record.clone(), snapshot);
        self.render();

        let status = self.status();
        if status.is_game_over() {
            info!("{status}");
            self.awaiting_reply = false;
        } else {
            self.awaiting_reply = self.opponent_to_move();
        }
        record
    }

    fn restart_common(&mut self) {
        self.premove = None;
        if let Some(opponent) = &mut self.opponent {
            opponent.reset();
        }
        self.refresh_turn();
        info!("new game from {}", self.fen());
        self.render();
    }

    fn ensure_ongoing(&self) -> Result<(), SessionError> {
        let status = self.status();
        if status.is_game_over() {
            return Err(SessionError::GameOver(status));
        }
        Ok(())
    }

    fn refresh_turn(&mut self) {
        self.awaiting_reply = !self.status().is_game_over() && self.opponent_to_move();
    }

    fn opponent_to_move(&self) -> bool {
        self.opponent.is_some() && self.rules.side_to_move() != self.config.human
    }

    fn render(&mut self) {
        self.view.render(self.timeline.active(), self.orientation);
    }
}
