//! Alpha-beta search used for the automated opponent and for analysis.

mod board_stack;
mod eval;
mod history_tables;
mod interface;
mod movelist;
mod search;
mod tt;

pub use interface::Engine;
pub use search::{SearchInfo, SearchLimits};
