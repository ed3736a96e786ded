use cozy_chess::{Board, Move};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engine::{Engine, SearchLimits};
use crate::rules::helpers::legal_moves;

/// Which automated player answers the human, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    None,
    Random,
    Search(SearchLimits),
}

/// Picks replies for the automated side.
pub enum Opponent {
    Random(StdRng),
    Search { engine: Engine, limits: SearchLimits },
}

impl Opponent {
    pub fn new(kind: OpponentKind, seed: Option<u64>, tt_bytes: usize) -> Option<Self> {
        match kind {
            OpponentKind::None => None,
            OpponentKind::Random => {
                let rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Some(Opponent::Random(rng))
            }
            OpponentKind::Search(limits) => Some(Opponent::Search {
                engine: Engine::new(tt_bytes),
                limits,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Opponent::Random(_) => "Random mover",
            Opponent::Search { .. } => "Search engine",
        }
    }

    pub fn reset(&mut self) {
        if let Opponent::Search { engine, .. } = self {
            engine.reset();
        }
    }

    /// Chooses a move for the last of `positions`, or `None` if there is none.
    pub fn choose(&mut self, positions: &[Board]) -> Option<Move> {
        match self {
            Opponent::Random(rng) => {
                let board = positions.last()?;
                let moves = legal_moves(board);
                let mv = moves.choose(rng).copied();
                debug!("random reply from {} legal moves", moves.len());
                mv
            }
            Opponent::Search { engine, limits } => {
                engine.think(positions, *limits, &mut |_| {}).map(|info| info.best_move)
            }
        }
    }
}
