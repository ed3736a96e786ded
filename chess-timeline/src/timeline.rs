use std::num::NonZeroUsize;

use log::debug;
use thiserror::Error;

/// Plies per exchange when one side always answers with an automated reply.
pub const DEFAULT_EXCHANGE_SIZE: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("cannot undo: {recorded} plies recorded, an exchange needs {needed}")]
    CannotUndo { recorded: usize, needed: usize },
    #[error("move {requested} is out of range: {available} complete exchanges recorded")]
    OutOfRange { requested: usize, available: usize },
    #[error("already at the first position")]
    AtStart,
    #[error("already at the latest position")]
    AtEnd,
}

/// Ordered history of one game: `snapshots[i]` is the position after `i`
/// plies and `moves[i]` is the ply that produced `snapshots[i + 1]`.
///
/// The committed frontier (`cursor`) only moves forward through
/// [`record_move`](Self::record_move) and backward through
/// [`undo_last_exchange`](Self::undo_last_exchange). Browsing moves a separate
/// view index and never touches the recorded history.
#[derive(Debug, Clone)]
pub struct Timeline<S, M> {
    snapshots: Vec<S>,
    moves: Vec<M>,
    history_index: usize,
    view_index: usize,
    exchange_size: NonZeroUsize,
}

impl<S, M> Timeline<S, M> {
    pub fn new(initial: S) -> Self {
        Self::with_exchange_size(initial, DEFAULT_EXCHANGE_SIZE)
    }

    pub fn with_exchange_size(initial: S, exchange_size: NonZeroUsize) -> Self {
        let mut snapshots = Vec::with_capacity(256);
        snapshots.push(initial);
        Self {
            snapshots,
            moves: Vec::with_capacity(256),
            history_index: 0,
            view_index: 0,
            exchange_size,
        }
    }

    /// Appends an accepted ply. The caller has already checked legality.
    pub fn record_move(&mut self, record: M, snapshot: S) {
        self.moves.push(record);
        self.snapshots.push(snapshot);
        self.history_index = self.moves.len();
        self.view_index = self.history_index;
        self.check_invariants();
        debug!("recorded ply {}", self.history_index);
    }

    /// Drops the last exchange and returns the snapshot that becomes active.
    pub fn undo_last_exchange(&mut self) -> Result<&S, TimelineError> {
        let needed = self.exchange_size.get();
        let recorded = self.moves.len();
        if recorded < needed {
            return Err(TimelineError::CannotUndo { recorded, needed });
        }

        self.moves.truncate(recorded - needed);
        self.snapshots.truncate(recorded - needed + 1);
        self.history_index = self.moves.len();
        self.view_index = self.history_index;
        self.check_invariants();
        debug!("undid {} plies, {} remain", needed, self.history_index);

        Ok(self.active())
    }

    /// Shows snapshot `(ply + 1) * exchange_size - 1`, i.e. the last snapshot
    /// before exchange `ply` completes. Only exchanges that are fully recorded
    /// can be visited.
    pub fn go_to_ply(&mut self, ply: usize) -> Result<&S, TimelineError> {
        let available = self.full_exchanges();
        if ply >= available {
            return Err(TimelineError::OutOfRange { requested: ply, available });
        }

        self.view_index = (ply + 1) * self.exchange_size.get() - 1;
        debug!("viewing snapshot {} of {}", self.view_index, self.history_index);
        Ok(self.active())
    }

    pub fn step_back(&mut self) -> Result<&S, TimelineError> {
        if self.view_index == 0 {
            return Err(TimelineError::AtStart);
        }
        self.view_index -= 1;
        Ok(self.active())
    }

    pub fn step_forward(&mut self) -> Result<&S, TimelineError> {
        if self.view_index >= self.history_index {
            return Err(TimelineError::AtEnd);
        }
        self.view_index += 1;
        Ok(self.active())
    }

    pub fn return_to_live(&mut self) -> &S {
        self.view_index = self.history_index;
        self.active()
    }

    /// Back to the starting snapshot with no moves.
    pub fn reset(&mut self) {
        self.snapshots.truncate(1);
        self.moves.clear();
        self.history_index = 0;
        self.view_index = 0;
        debug!("timeline reset");
    }

    /// Starts over from a different initial snapshot.
    pub fn restart(&mut self, initial: S) {
        self.reset();
        self.snapshots[0] = initial;
    }

    pub fn moves(&self) -> &[M] {
        &self.moves
    }

    pub fn snapshots(&self) -> &[S] {
        &self.snapshots
    }

    /// Snapshots from the start up to and including the committed frontier.
    pub fn committed(&self) -> &[S] {
        &self.snapshots[..=self.history_index]
    }

    pub fn cursor(&self) -> usize {
        self.history_index
    }

    pub fn view_index(&self) -> usize {
        self.view_index
    }

    /// The snapshot currently shown.
    pub fn active(&self) -> &S {
        &self.snapshots[self.view_index]
    }

    /// The snapshot at the committed frontier.
    pub fn live(&self) -> &S {
        &self.snapshots[self.history_index]
    }

    pub fn initial(&self) -> &S {
        &self.snapshots[0]
    }

    pub fn last_move(&self) -> Option<&M> {
        self.moves.last()
    }

    pub fn is_browsing(&self) -> bool {
        self.view_index != self.history_index
    }

    pub fn can_undo(&self) -> bool {
        self.moves.len() >= self.exchange_size.get()
    }

    pub fn exchange_size(&self) -> NonZeroUsize {
        self.exchange_size
    }

    pub fn full_exchanges(&self) -> usize {
        self.moves.len() / self.exchange_size.get()
    }

    fn check_invariants(&self) {
        assert_eq!(self.snapshots.len(), self.moves.len() + 1, "snapshot/move length mismatch");
        debug_assert_eq!(self.history_index, self.moves.len());
        debug_assert!(self.view_index <= self.history_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_with(plies: &[(&'static str, &'static str)]) -> Timeline<&'static str, &'static str> {
        let mut timeline = Timeline::new("S0");
        for &(record, snapshot) in plies {
            timeline.record_move(record, snapshot);
        }
        timeline
    }

    const FOUR_PLIES: [(&str, &str); 4] = [("e4", "S1"), ("e5", "S2"), ("Nf3", "S3"), ("Nc6", "S4")];

    #[test]
    fn lengths_track_recorded_moves() {
        let mut timeline = Timeline::new("S0");
        for (n, &(record, snapshot)) in FOUR_PLIES.iter().enumerate() {
            timeline.record_move(record, snapshot);
            assert_eq!(timeline.moves().len(), n + 1);
            assert_eq!(timeline.snapshots().len(), n + 2);
            assert_eq!(timeline.cursor(), n + 1);
        }
    }

    #[test]
    fn undo_removes_a_whole_exchange() {
        let mut timeline = timeline_with(&FOUR_PLIES[..2]);
        assert_eq!(timeline.undo_last_exchange(), Ok(&"S0"));
        assert!(timeline.moves().is_empty());
        assert_eq!(timeline.cursor(), 0);
        assert_eq!(*timeline.active(), "S0");
    }

    #[test]
    fn two_undos_after_four_moves_restore_the_start() {
        let mut timeline = timeline_with(&FOUR_PLIES);
        assert_eq!(timeline.undo_last_exchange(), Ok(&"S2"));
        assert_eq!(timeline.undo_last_exchange(), Ok(&"S0"));
        assert!(timeline.moves().is_empty());
        assert_eq!(timeline.snapshots(), &["S0"]);
    }

    #[test]
    fn undo_without_a_full_exchange_is_a_no_op() {
        let mut empty = timeline_with(&[]);
        assert_eq!(
            empty.undo_last_exchange(),
            Err(TimelineError::CannotUndo { recorded: 0, needed: 2 })
        );
        assert_eq!(empty.snapshots(), &["S0"]);

        let mut single = timeline_with(&FOUR_PLIES[..1]);
        assert_eq!(
            single.undo_last_exchange(),
            Err(TimelineError::CannotUndo { recorded: 1, needed: 2 })
        );
        assert_eq!(single.moves(), &["e4"]);
        assert_eq!(single.snapshots(), &["S0", "S1"]);
        assert_eq!(single.cursor(), 1);
    }

    #[test]
    fn go_to_ply_only_moves_the_view() {
        let mut timeline = timeline_with(&FOUR_PLIES);
        let snapshots = timeline.snapshots().to_vec();
        let moves = timeline.moves().to_vec();

        assert_eq!(timeline.go_to_ply(0), Ok(&"S1"));
        assert_eq!(timeline.go_to_ply(1), Ok(&"S3"));
        assert!(timeline.is_browsing());
        assert_eq!(timeline.cursor(), 4);
        assert_eq!(timeline.snapshots(), snapshots.as_slice());
        assert_eq!(timeline.moves(), moves.as_slice());
    }

    #[test]
    fn go_to_ply_rejects_incomplete_exchanges() {
        let mut timeline = timeline_with(&FOUR_PLIES[..3]);
        assert_eq!(timeline.go_to_ply(0), Ok(&"S1"));
        assert_eq!(
            timeline.go_to_ply(1),
            Err(TimelineError::OutOfRange { requested: 1, available: 1 })
        );
        assert_eq!(timeline.view_index(), 1);
    }

    #[test]
    fn recording_returns_the_view_to_the_frontier() {
        let mut timeline = timeline_with(&FOUR_PLIES[..2]);
        timeline.go_to_ply(0).unwrap();
        timeline.record_move("Nf3", "S3");
        assert!(!timeline.is_browsing());
        assert_eq!(*timeline.active(), "S3");
    }

    #[test]
    fn stepping_stays_within_committed_history() {
        let mut timeline = timeline_with(&FOUR_PLIES[..2]);
        assert_eq!(timeline.step_forward(), Err(TimelineError::AtEnd));
        assert_eq!(timeline.step_back(), Ok(&"S1"));
        assert_eq!(timeline.step_back(), Ok(&"S0"));
        assert_eq!(timeline.step_back(), Err(TimelineError::AtStart));
        assert_eq!(timeline.step_forward(), Ok(&"S1"));
        assert_eq!(*timeline.return_to_live(), "S2");
        assert_eq!(*timeline.live(), "S2");
    }

    #[test]
    fn reset_returns_to_the_singleton_state() {
        let mut timeline = timeline_with(&FOUR_PLIES);
        timeline.go_to_ply(1).unwrap();
        timeline.reset();
        assert!(timeline.moves().is_empty());
        assert_eq!(timeline.snapshots(), &["S0"]);
        assert_eq!(timeline.cursor(), 0);
        assert_eq!(timeline.view_index(), 0);

        timeline.restart("T0");
        assert_eq!(*timeline.initial(), "T0");
    }

    #[test]
    fn exchange_size_is_configurable() {
        let single = NonZeroUsize::new(1).unwrap();
        let mut timeline = Timeline::with_exchange_size("S0", single);
        timeline.record_move("e4", "S1");
        assert!(timeline.can_undo());
        assert_eq!(timeline.go_to_ply(0), Ok(&"S0"));
        assert_eq!(timeline.undo_last_exchange(), Ok(&"S0"));

        let triple = NonZeroUsize::new(3).unwrap();
        let mut timeline = Timeline::with_exchange_size("S0", triple);
        for &(record, snapshot) in &FOUR_PLIES {
            timeline.record_move(record, snapshot);
        }
        assert_eq!(timeline.full_exchanges(), 1);
        assert_eq!(timeline.go_to_ply(0), Ok(&"S2"));
        assert_eq!(timeline.undo_last_exchange(), Ok(&"S1"));
        assert_eq!(timeline.moves(), &["e4"]);
    }
}
