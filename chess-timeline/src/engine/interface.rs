use cozy_chess::Board;

use super::history_tables::HistoryTables;
use super::search::{Search, SearchInfo, SearchLimits};
use super::tt::TranspositionTable;

pub struct Engine {
    tt: TranspositionTable,
    history: HistoryTables,
}

impl Engine {
    pub const DEFAULT_TT_BYTES: usize = 4 * 1024 * 1024;

    pub fn new(tt_bytes: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_bytes),
            history: HistoryTables::new(),
        }
    }

    pub fn reset(&mut self) {
        self.tt.clear();
        self.history.clear();
    }

    /// Searches the last of `positions`; earlier entries are the game so far.
    pub fn think(
        &mut self,
        positions: &[Board],
        limits: SearchLimits,
        on_iter: &mut dyn FnMut(SearchInfo),
    ) -> Option<SearchInfo> {
        let search = Search::new(&mut self.tt, &mut self.history, limits);
        search.start(positions, on_iter)
    }
}
