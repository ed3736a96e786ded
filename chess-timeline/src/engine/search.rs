use std::time::{Duration, Instant};

use cozy_chess::{Board, GameStatus, Move};
use log::debug;

use super::board_stack::BoardStack;
use super::eval::{evaluate, CHECKMATE, INFINITY};
use super::history_tables::HistoryTables;
use super::movelist::{get_ordered_moves, MoveList};
use super::tt::{score_from_tt, score_to_tt, TranspositionTable, TtBound, TtEntry};
use crate::rules::helpers::move_is_capture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimits {
    Depth(u8),
    MoveTime(Duration),
}

#[derive(Debug, Clone, Copy)]
pub struct SearchInfo {
    pub depth: u8,
    pub nodes: u64,
    pub eval: i16,
    pub time: Duration,
    pub best_move: Move,
}

pub struct Search<'s> {
    tt: &'s mut TranspositionTable,
    history: &'s mut HistoryTables,
    search_start: Instant,
    soft_limit: Duration,
    hard_limit: Duration,
    max_depth: u8,
    best_move: Option<Move>,
    nodes: u64,
}

impl<'s> Search<'s> {
    pub fn new(tt: &'s mut TranspositionTable, history: &'s mut HistoryTables, limits: SearchLimits) -> Self {
        let mut soft_limit = Duration::MAX;
        let mut hard_limit = Duration::MAX;
        let mut max_depth = u8::MAX;
        match limits {
            SearchLimits::Depth(depth) => {
                max_depth = depth.max(1);
            }
            SearchLimits::MoveTime(time) => {
                soft_limit = time / 2;
                hard_limit = time;
            }
        }

        Self {
            tt,
            history,
            search_start: Instant::now(),
            soft_limit,
            hard_limit,
            max_depth,
            best_move: None,
            nodes: 0,
        }
    }

    /// Iterative deepening from the last of `positions`. Returns the deepest
    /// completed iteration, or `None` if the side to move has no moves.
    pub fn start(mut self, positions: &[Board], on_iter: &mut dyn FnMut(SearchInfo)) -> Option<SearchInfo> {
        let mut board = BoardStack::new(positions);
        if !matches!(board.get().status(), GameStatus::Ongoing) {
            return None;
        }

        let mut last = None;
        for target_depth in 1..=self.max_depth {
            let Some((eval, best_move)) = self.search_root(&mut board, target_depth) else {
                break;
            };
            self.best_move = Some(best_move);

            let info = SearchInfo {
                depth: target_depth,
                nodes: self.nodes,
                eval,
                time: self.search_start.elapsed(),
                best_move,
            };
            debug!("depth {} eval {} nodes {} best {}", info.depth, info.eval, info.nodes, info.best_move);
            on_iter(info);
            last = Some(info);

            if self.search_start.elapsed() >= self.soft_limit {
                break;
            }
        }
        last
    }

    /// Full-window search over the root moves. Never cuts off on the table so
    /// every iteration yields a move.
    fn search_root(&mut self, board: &mut BoardStack, depth: u8) -> Option<(i16, Move)> {
        self.nodes += 1;
        let tt_entry = self.tt.load(board.get().hash());
        let mut alpha = -INFINITY;
        let mut best = None;

        let movelist = get_ordered_moves(board.get(), tt_entry, self.history, false);
        for (i, mv) in movelist.into_iter().enumerate() {
            let score = self.search_child(board, mv, i == 0, alpha, INFINITY, depth, 0)?;
            if best.is_none() || score > alpha {
                alpha = score;
                best = Some((score, mv));
            }
        }

        let (score, mv) = best?;
        self.store(board, mv, depth, score, -INFINITY, INFINITY, 0);
        Some((score, mv))
    }

    /// Principal variation search of `mv`: a null window first unless it is
    /// the first move, widened when the score lands inside the window.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        board: &mut BoardStack,
        mv: Move,
        first: bool,
        alpha: i16,
        beta: i16,
        depth: u8,
        ply: u16,
    ) -> Option<i16> {
        board.play_unchecked(mv);
        let mut score = -INFINITY;
        if !first {
            score = -self.negamax(board, -alpha - 1, -alpha, depth - 1, ply + 1)?;
        }
        if first || score > alpha && score < beta {
            score = -self.negamax(board, -beta, -alpha, depth - 1, ply + 1)?;
        }
        board.undo();
        Some(score)
    }

    fn negamax(&mut self, board: &mut BoardStack, mut alpha: i16, beta: i16, depth: u8, ply: u16) -> Option<i16> {
        debug_assert!(-INFINITY <= alpha && alpha < beta && beta <= INFINITY);

        if board.repetitions() >= 3 {
            return Some(0);
        }
        if depth == 0 {
            return Some(self.qsearch(board, alpha, beta, ply));
        }

        self.nodes += 1;
        if self.out_of_time() {
            return None;
        }

        match board.get().status() {
            GameStatus::Won => return Some(-CHECKMATE + ply as i16),
            GameStatus::Drawn => return Some(0),
            GameStatus::Ongoing => {}
        }

        let is_pv = alpha + 1 != beta;
        let init_alpha = alpha;
        let tt_entry = self.tt.load(board.get().hash());
        if let Some(entry) = tt_entry.filter(|entry| !is_pv && entry.depth >= depth) {
            let score = score_from_tt(entry.score, ply);
            let cutoff = match entry.bound {
                TtBound::Exact => true,
                TtBound::Lower => score >= beta,
                TtBound::Upper => score <= alpha,
            };
            if cutoff {
                return Some(score);
            }
        }

        let mut best_move = None;
        let mut best_score = -INFINITY;
        let mut quiets_tried = MoveList::new();
        let movelist = get_ordered_moves(board.get(), tt_entry, self.history, false);
        for (i, mv) in movelist.into_iter().enumerate() {
            let is_quiet = !move_is_capture(board.get(), mv);
            let score = self.search_child(board, mv, i == 0, alpha, beta, depth, ply)?;

            if score > best_score {
                best_move = Some(mv);
                best_score = score;
                alpha = alpha.max(score);
            }
            if score >= beta {
                if is_quiet {
                    self.history.reward_cutoff(board.get(), mv, &quiets_tried, depth);
                }
                break;
            }
            if is_quiet {
                quiets_tried.push(mv);
            }
        }

        // An ongoing position always has a move.
        let best_move = best_move?;
        self.store(board, best_move, depth, best_score, init_alpha, beta, ply);
        Some(best_score)
    }

    #[allow(clippy::too_many_arguments)]
    fn store(&mut self, board: &BoardStack, best_move: Move, depth: u8, score: i16, alpha: i16, beta: i16, ply: u16) {
        let bound = if score >= beta {
            TtBound::Lower
        } else if score > alpha {
            TtBound::Exact
        } else {
            TtBound::Upper
        };
        self.tt.store(board.get().hash(), TtEntry {
            best_move,
            depth,
            score: score_to_tt(score, ply),
            bound,
        });
    }

    fn out_of_time(&self) -> bool {
        self.nodes % 1024 == 0 && self.best_move.is_some() && self.search_start.elapsed() >= self.hard_limit
    }

    /// Captures only, standing pat on the static evaluation.
    fn qsearch(&mut self, board: &mut BoardStack, mut alpha: i16, beta: i16, ply: u16) -> i16 {
        self.nodes += 1;
        match board.get().status() {
            GameStatus::Won => return -CHECKMATE + ply as i16,
            GameStatus::Drawn => return 0,
            GameStatus::Ongoing => {}
        }

        let stand_pat = evaluate(board.get());
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);

        let tt_entry = self.tt.load(board.get().hash());
        let mut best_score = stand_pat;
        for mv in get_ordered_moves(board.get(), tt_entry, self.history, true) {
            board.play_unchecked(mv);
            let score = -self.qsearch(board, -beta, -alpha, ply + 1);
            board.undo();

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if score >= beta {
                break;
            }
        }
        best_score
    }
}
