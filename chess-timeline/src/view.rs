use std::io::Write;

use cozy_chess::{Board, Color, File, Rank, Square};
use log::warn;

use crate::rules::helpers::{file_char, piece_char, rank_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }
}

impl From<Color> for Orientation {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Orientation::White,
            Color::Black => Orientation::Black,
        }
    }
}

/// Anything that can show a position.
pub trait BoardView {
    fn render(&mut self, board: &Board, orientation: Orientation);
}

/// Eight ranks of piece letters with coordinates, `.` for empty squares.
pub fn draw(board: &Board, orientation: Orientation) -> String {
    let (ranks, files): (Vec<Rank>, Vec<File>) = match orientation {
        Orientation::White => (Rank::ALL.iter().rev().copied().collect(), File::ALL.to_vec()),
        Orientation::Black => (Rank::ALL.to_vec(), File::ALL.iter().rev().copied().collect()),
    };

    let mut out = String::with_capacity(200);
    for &rank in &ranks {
        out.push(rank_char(rank));
        for &file in &files {
            let square = Square::new(file, rank);
            let symbol = match (board.piece_on(square), board.color_on(square)) {
                (Some(piece), Some(color)) => piece_char(piece, color == Color::White),
                _ => '.',
            };
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }
    out.push(' ');
    for &file in &files {
        out.push(' ');
        out.push(file_char(file));
    }
    out.push('\n');
    out
}

/// Writes the board as text to any writer.
pub struct TextBoard<W> {
    out: W,
}

impl<W: Write> TextBoard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BoardView for TextBoard<W> {
    fn render(&mut self, board: &Board, orientation: Orientation) {
        let text = draw(board, orientation);
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("failed to render board: {err}");
        }
    }
}

/// Discards every render.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoView;

impl BoardView for NoView {
    fn render(&mut self, _board: &Board, _orientation: Orientation) {}
}
