use cozy_chess::{Board, Color, Piece, Square};

pub const INFINITY: i16 = 30_000;
pub const CHECKMATE: i16 = 29_000;
/// Scores beyond this are mate scores.
pub const MATE_BOUND: i16 = CHECKMATE - 1_000;

const PIECE_VALUES: [i16; Piece::NUM] = [100, 310, 330, 500, 950, 0];

/// Static evaluation from the side to move's point of view.
pub fn evaluate(board: &Board) -> i16 {
    let us = board.side_to_move();
    side_score(board, us) - side_score(board, !us)
}

fn side_score(board: &Board, color: Color) -> i16 {
    let mut score = 0;
    for &piece in &Piece::ALL {
        for square in board.colored_pieces(color, piece) {
            score += PIECE_VALUES[piece as usize] + placement(piece, square, color);
        }
    }
    score
}

fn placement(piece: Piece, square: Square, color: Color) -> i16 {
    let file = square.file() as i16;
    let rank = square.rank().relative_to(color) as i16;
    // 0 in the corners, 6 in the four central squares
    let centrality = 7 - ((2 * file - 7).abs() + (2 * rank - 7).abs()) / 2;

    match piece {
        Piece::Pawn => rank * 6 + if (2..=5).contains(&file) { centrality } else { 0 },
        Piece::Knight => centrality * 5,
        Piece::Bishop => centrality * 3,
        Piece::Rook => if rank == 6 { 15 } else { 0 },
        Piece::Queen => centrality,
        Piece::King => -centrality * 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(evaluate(&Board::default()), 0);
    }

    #[test]
    fn material_dominates() {
        let board: Board = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        assert!(evaluate(&board) > 800);
        let board: Board = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();
        assert!(evaluate(&board) < -800);
    }
}
