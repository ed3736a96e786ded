use cozy_chess::util::parse_uci_move;
use cozy_chess::{Board, GameStatus, Move, Piece};

use super::helpers::{
    file_char, legal_moves, move_is_capture, move_is_castle, piece_char, rank_char, square_name,
};

/// Standard algebraic notation of a legal move, with check and mate suffixes.
pub fn san(board: &Board, mv: Move) -> String {
    let mut san = san_body(board, mv);

    let mut child = board.clone();
    child.play_unchecked(mv);
    if child.status() == GameStatus::Won {
        san.push('#');
    } else if !child.checkers().is_empty() {
        san.push('+');
    }

    san
}

fn san_body(board: &Board, mv: Move) -> String {
    if move_is_castle(board, mv) {
        let short = (mv.to.file() as u8) > (mv.from.file() as u8);
        return if short { "O-O" } else { "O-O-O" }.to_owned();
    }

    let piece = board.piece_on(mv.from).expect("missing piece?");
    let capture = move_is_capture(board, mv);
    let mut san = String::with_capacity(8);

    if piece == Piece::Pawn {
        if capture {
            san.push(file_char(mv.from.file()));
            san.push('x');
        }
        san.push_str(&square_name(mv.to));
        if let Some(promotion) = mv.promotion {
            san.push('=');
            san.push(piece_char(promotion, true));
        }
        return san;
    }

    san.push(piece_char(piece, true));

    let rivals = legal_moves(board)
        .into_iter()
        .filter(|other| other.to == mv.to && other.from != mv.from)
        .filter(|other| board.piece_on(other.from) == Some(piece))
        .map(|other| other.from)
        .collect::<Vec<_>>();
    if !rivals.is_empty() {
        let shares_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
        let shares_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());
        if !shares_file {
            san.push(file_char(mv.from.file()));
        } else if !shares_rank {
            san.push(rank_char(mv.from.rank()));
        } else {
            san.push_str(&square_name(mv.from));
        }
    }

    if capture {
        san.push('x');
    }
    san.push_str(&square_name(mv.to));
    san
}

/// Parses UCI (`e2e4`, `e7e8q`, `e1g1`) or SAN (`Nf3`, `exd5`, `O-O`) input.
/// Returns `None` if the text names no legal move.
pub fn parse_move(board: &Board, text: &str) -> Option<Move> {
    let text = text.trim();
    if let Ok(mv) = parse_uci_move(board, text) {
        if board.is_legal(mv) {
            return Some(mv);
        }
    }

    let wanted = normalize_san(text);
    if wanted.is_empty() {
        return None;
    }
    legal_moves(board)
        .into_iter()
        .find(|&mv| san_body(board, mv) == wanted)
}

fn normalize_san(text: &str) -> String {
    text.trim_end_matches(['+', '#', '!', '?'])
        .replace('0', "O")
}
