use std::fmt;

use cozy_chess::{Color, Move, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Capture,
    Promotion,
    Castle,
}

/// Which sound a front end should play for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Move,
    Capture,
    Check,
}

/// One accepted ply, described against the position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub san: String,
    pub uci: String,
    pub color: Color,
    pub piece: Piece,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub check: bool,
}

impl MoveRecord {
    pub fn cue(&self) -> SoundCue {
        if self.captured.is_some() {
            SoundCue::Capture
        } else if self.check {
            SoundCue::Check
        } else {
            SoundCue::Move
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.san)
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
