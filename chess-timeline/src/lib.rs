pub mod engine;
pub mod opponent;
pub mod pgn;
pub mod record;
pub mod rules;
pub mod session;
pub mod timeline;
pub mod view;

pub use record::{MoveKind, MoveRecord, SoundCue};
pub use session::{Session, SessionConfig, SessionError};
pub use timeline::{Timeline, TimelineError};
