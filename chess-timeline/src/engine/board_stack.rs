use cozy_chess::{Board, Move};

/// Search-time position stack seeded with the game played so far, so that
/// repetitions of earlier game positions are seen by the search.
pub struct BoardStack {
    history: Vec<u64>,
    stack: Vec<Board>,
}

impl BoardStack {
    /// `positions` runs from the start of the game to the position to search.
    pub fn new(positions: &[Board]) -> Self {
        let current = positions.last().expect("empty game history?");

        let mut history = Vec::with_capacity(positions.len() + 256);
        history.extend(positions.iter().map(Board::hash));

        let mut stack = Vec::with_capacity(256);
        stack.push(current.clone());

        Self { history, stack }
    }

    pub fn get(&self) -> &Board {
        self.stack.last().expect("missing board?")
    }

    pub fn play_unchecked(&mut self, mv: Move) {
        let mut next = self.get().clone();
        next.play_unchecked(mv);

        self.history.push(next.hash());
        self.stack.push(next);
    }

    pub fn undo(&mut self) {
        assert!(self.stack.len() > 1, "undo past the search root");
        self.history.pop();
        self.stack.pop();
    }

    pub fn repetitions(&self) -> usize {
        let hash = self.get().hash();
        let reversible = self.get().halfmove_clock() as usize + 1;
        self.history
            .iter()
            .rev()
            .take(reversible)
            .filter(|&&h| h == hash)
            .count()
    }
}
