//! PGN export of a recorded game.

use cozy_chess::{Board, Color};

use crate::record::MoveRecord;

const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const MAX_LINE: usize = 79;

pub struct PgnHeaders<'a> {
    pub event: &'a str,
    pub white: &'a str,
    pub black: &'a str,
    pub result: &'a str,
}

/// Seven Tag Roster, a `SetUp`/`FEN` pair for non-standard starts, then SAN
/// movetext wrapped below 80 columns.
pub fn write_pgn(initial: &Board, moves: &[MoveRecord], headers: &PgnHeaders<'_>) -> String {
    let mut out = String::new();
    let mut tag = |key: &str, value: &str| {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    };
    tag("Event", headers.event);
    tag("Site", "Local");
    tag("Date", "????.??.??");
    tag("Round", "-");
    tag("White", headers.white);
    tag("Black", headers.black);
    tag("Result", headers.result);

    let initial_fen = initial.to_string();
    if initial_fen != STARTING_POSITION_FEN {
        tag("SetUp", "1");
        tag("FEN", &initial_fen);
    }
    out.push('\n');

    let mut tokens = numbered_moves(initial, moves);
    tokens.push(headers.result.to_owned());

    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > MAX_LINE {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        line_len += token.len();
        out.push_str(&token);
    }
    out.push('\n');

    out
}

/// SAN moves with move numbers, `12...` when the first move is black's.
pub fn numbered_moves(initial: &Board, moves: &[MoveRecord]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(moves.len() * 3 / 2 + 1);
    let mut move_number = initial.fullmove_number();
    for (ply, record) in moves.iter().enumerate() {
        match record.color {
            Color::White => tokens.push(format!("{move_number}.")),
            Color::Black if ply == 0 => tokens.push(format!("{move_number}...")),
            Color::Black => {}
        }
        tokens.push(record.san.clone());
        if record.color == Color::Black {
            move_number += 1;
        }
    }
    tokens
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
