use cozy_chess::{BitBoard, Board, File, Move, Piece, Rank, Square};

pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|packed_moves| {
        moves.extend(packed_moves);
        false
    });
    moves
}

pub fn move_is_capture(board: &Board, mv: Move) -> bool {
    captured_piece(board, mv).is_some()
}

pub fn captured_piece(board: &Board, mv: Move) -> Option<Piece> {
    let enemy_pieces = board.colors(!board.side_to_move());
    if enemy_pieces.has(mv.to) {
        return board.piece_on(mv.to);
    }

    let is_pawn_move = board.pieces(Piece::Pawn).has(mv.from);
    let ep_square = board.en_passant().map(|file| {
        let rank = Rank::Sixth.relative_to(board.side_to_move());
        Square::new(file, rank)
    });
    if is_pawn_move && Some(mv.to) == ep_square {
        return Some(Piece::Pawn);
    }

    None
}

/// Castling moves are encoded as the king capturing its own rook.
pub fn move_is_castle(board: &Board, mv: Move) -> bool {
    board.pieces(Piece::King).has(mv.from) && board.colors(board.side_to_move()).has(mv.to)
}

/// Bare kings, a single minor piece, or only bishops that all stand on the
/// same square colour.
pub fn insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if heavy != BitBoard::EMPTY {
        return false;
    }
    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);
    if (knights | bishops).len() <= 1 {
        return true;
    }
    if knights != BitBoard::EMPTY {
        return false;
    }

    let mut shades = bishops.into_iter().map(is_light_square);
    match shades.next() {
        Some(first) => shades.all(|shade| shade == first),
        None => true,
    }
}

fn is_light_square(square: Square) -> bool {
    (square.file() as u8 + square.rank() as u8) % 2 == 1
}

pub fn file_char(file: File) -> char {
    (b'a' + file as u8) as char
}

pub fn rank_char(rank: Rank) -> char {
    (b'1' + rank as u8) as char
}

pub fn square_name(square: Square) -> String {
    let mut name = String::with_capacity(2);
    name.push(file_char(square.file()));
    name.push(rank_char(square.rank()));
    name
}

/// Upper-case letter for white, lower-case for black.
pub fn piece_char(piece: Piece, white: bool) -> char {
    let letter = match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    };
    if white { letter } else { letter.to_ascii_lowercase() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn en_passant_captures_a_pawn() {
        let board = board("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let mv: Move = "e5f6".parse().unwrap();
        assert_eq!(captured_piece(&board, mv), Some(Piece::Pawn));
        assert!(!move_is_capture(&board, "e5e6".parse().unwrap()));
    }

    #[test]
    fn castling_is_king_onto_rook() {
        let board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(move_is_castle(&board, "e1h1".parse().unwrap()));
        assert!(move_is_castle(&board, "e1a1".parse().unwrap()));
        assert!(!move_is_castle(&board, "e1f1".parse().unwrap()));
    }

    #[test]
    fn detects_insufficient_material() {
        assert!(insufficient_material(&board("8/8/4k3/8/8/3K4/8/8 w - - 0 1")));
        assert!(insufficient_material(&board("8/8/4k3/8/8/3KN3/8/8 w - - 0 1")));
        assert!(!insufficient_material(&board("8/8/4k3/8/8/3KNN2/8/8 w - - 0 1")));
        assert!(!insufficient_material(&board("8/8/4k3/8/8/3KP3/8/8 w - - 0 1")));
    }

    #[test]
    fn bishops_on_one_colour_cannot_mate() {
        // c1 and f4 are both dark.
        assert!(insufficient_material(&board("8/8/4k3/8/5b2/3K4/8/2B5 w - - 0 1")));
        // c1 is dark, a2 is light.
        assert!(!insufficient_material(&board("8/8/4k3/8/8/3K4/b7/2B5 w - - 0 1")));
        assert!(!insufficient_material(&board("8/8/4k3/8/5b2/3K4/8/2N5 w - - 0 1")));
        assert!(is_light_square(Square::H1));
        assert!(!is_light_square(Square::A1));
    }

    #[test]
    fn names_squares() {
        assert_eq!(square_name(Square::E4), "e4");
        assert_eq!(square_name(Square::A8), "a8");
        assert_eq!(piece_char(Piece::Knight, false), 'n');
    }
}
