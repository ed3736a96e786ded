use cozy_chess::{Board, Color, Move, Piece, Square};

/// Quiet-move ordering scores indexed by mover, piece and destination.
pub struct HistoryTables {
    piece_to: [[[i32; Square::NUM]; Piece::NUM]; Color::NUM],
}

impl HistoryTables {
    pub const MAX_HISTORY: i32 = 512;

    pub fn new() -> Self {
        Self {
            piece_to: [[[0; Square::NUM]; Piece::NUM]; Color::NUM],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn get_quiet_score(&self, board: &Board, mv: Move) -> i32 {
        let color = board.side_to_move();
        let piece = board.piece_on(mv.from).expect("missing piece?");
        self.piece_to[color as usize][piece as usize][mv.to as usize]
    }

    /// Rewards the quiet move that caused a beta cutoff and penalizes the
    /// quiet moves searched before it.
    pub fn reward_cutoff(&mut self, board: &Board, best: Move, tried: &[Move], depth: u8) {
        let bonus = depth as i32 * depth as i32;
        self.update_move(board, best, bonus);
        for &mv in tried {
            self.update_move(board, mv, -bonus);
        }
    }

    pub fn update_move(&mut self, board: &Board, mv: Move, change: i32) {
        let color = board.side_to_move();
        let piece = board.piece_on(mv.from).expect("missing piece?");
        let score = &mut self.piece_to[color as usize][piece as usize][mv.to as usize];

        *score += change - change.abs() * *score / Self::MAX_HISTORY;
        *score = (*score).clamp(-Self::MAX_HISTORY, Self::MAX_HISTORY);
    }
}
