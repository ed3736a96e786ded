use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chess_timeline::engine::{Engine, SearchLimits};
use chess_timeline::opponent::OpponentKind;
use chess_timeline::SessionConfig;
use clap::{Parser, ValueEnum};
use cozy_chess::Color;

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "chess-timeline")]
#[clap(about = "Plays a game against a simple opponent with undo and history browsing", long_about = None)]
pub struct Cli {
    /// Starting position in FEN; the standard start if omitted.
    #[clap(long, env = "CHESS_TIMELINE_FEN")]
    pub fen: Option<String>,

    #[clap(long, value_enum, default_value_t = Side::White, env = "CHESS_TIMELINE_COLOR")]
    pub color: Side,

    #[clap(long, value_enum, default_value_t = OpponentArg::Random, env = "CHESS_TIMELINE_OPPONENT")]
    pub opponent: OpponentArg,

    /// Search depth for the search opponent.
    #[clap(long, default_value_t = 3)]
    pub depth: u8,

    /// Milliseconds per search move; overrides --depth.
    #[clap(long)]
    pub movetime: Option<u64>,

    /// Plies taken back by one undo.
    #[clap(long, env = "CHESS_TIMELINE_EXCHANGE_SIZE")]
    pub exchange_size: Option<usize>,

    #[clap(long, env = "CHESS_TIMELINE_SEED")]
    pub seed: Option<u64>,

    /// Milliseconds to wait before the opponent replies.
    #[clap(long, default_value_t = 500, env = "CHESS_TIMELINE_REPLY_DELAY")]
    pub reply_delay: u64,

    /// Default depth for the `analyze` command.
    #[clap(long, default_value_t = 4)]
    pub analysis_depth: u8,

    #[clap(long, default_value_t = 16)]
    pub hash_mb: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentArg {
    None,
    Random,
    Search,
}

impl Cli {
    pub fn search_limits(&self) -> SearchLimits {
        match self.movetime {
            Some(ms) => SearchLimits::MoveTime(Duration::from_millis(ms)),
            None => SearchLimits::Depth(self.depth),
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay)
    }

    pub fn session_config(&self) -> Result<SessionConfig> {
        let exchange_size = self
            .exchange_size
            .map(|size| NonZeroUsize::new(size).ok_or_else(|| anyhow!("--exchange-size must be at least 1")))
            .transpose()?;

        let tt_bytes = match self.hash_mb {
            0 => Engine::DEFAULT_TT_BYTES,
            mb => mb * 1024 * 1024,
        };

        Ok(SessionConfig {
            start_fen: self.fen.clone(),
            human: match self.color {
                Side::White => Color::White,
                Side::Black => Color::Black,
            },
            opponent: match self.opponent {
                OpponentArg::None => OpponentKind::None,
                OpponentArg::Random => OpponentKind::Random,
                OpponentArg::Search => OpponentKind::Search(self.search_limits()),
            },
            exchange_size,
            seed: self.seed,
            tt_bytes,
        })
    }
}
