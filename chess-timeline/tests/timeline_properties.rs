use chess_timeline::rules::Rules;
use chess_timeline::{MoveRecord, Timeline, TimelineError};
use cozy_chess::Board;

const OPENING: [&str; 8] = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6"];

fn record(plies: &[&str]) -> (Timeline<Board, MoveRecord>, Vec<Board>) {
    let mut rules = Rules::new(Board::default());
    let mut timeline = Timeline::new(rules.board().clone());
    let mut boards = vec![rules.board().clone()];
    for ply in plies {
        let (record, snapshot) = rules.apply(ply).unwrap();
        boards.push(snapshot.clone());
        timeline.record_move(record, snapshot);
    }
    (timeline, boards)
}

fn sans(timeline: &Timeline<Board, MoveRecord>) -> Vec<&str> {
    timeline.moves().iter().map(|record| record.san.as_str()).collect()
}

#[test]
fn lengths_hold_for_every_prefix() {
    for n in 0..=OPENING.len() {
        let (timeline, _) = record(&OPENING[..n]);
        assert_eq!(timeline.moves().len(), n);
        assert_eq!(timeline.snapshots().len(), n + 1);
        assert_eq!(timeline.cursor(), n);
    }
}

#[test]
fn e4_e5_then_undo_restores_the_start() {
    let (mut timeline, boards) = record(&OPENING[..2]);
    assert_eq!(timeline.snapshots(), boards.as_slice());

    let active = timeline.undo_last_exchange().unwrap().clone();
    assert_eq!(active, Board::default());
    assert!(timeline.moves().is_empty());
}

#[test]
fn two_undos_after_four_moves() {
    let (mut timeline, _) = record(&OPENING[..4]);
    timeline.undo_last_exchange().unwrap();
    let active = timeline.undo_last_exchange().unwrap().clone();
    assert_eq!(active, Board::default());
    assert_eq!(timeline.moves().len(), 0);
}

#[test]
fn undo_on_short_histories_does_not_mutate() {
    for n in 0..2 {
        let (mut timeline, boards) = record(&OPENING[..n]);
        assert!(matches!(timeline.undo_last_exchange(), Err(TimelineError::CannotUndo { .. })));
        assert_eq!(timeline.snapshots(), boards.as_slice());
        assert_eq!(timeline.moves().len(), n);
    }
}

#[test]
fn go_to_ply_returns_the_first_ply_of_each_exchange() {
    let (mut timeline, boards) = record(&OPENING);
    let before = sans(&timeline).join(" ");

    for k in 0..4 {
        let shown = timeline.go_to_ply(k).unwrap().clone();
        assert_eq!(shown, boards[2 * k + 1]);
    }
    assert_eq!(
        timeline.go_to_ply(4),
        Err(TimelineError::OutOfRange { requested: 4, available: 4 })
    );

    assert_eq!(sans(&timeline).join(" "), before);
    assert_eq!(timeline.snapshots(), boards.as_slice());
}

#[test]
fn go_to_ply_zero_after_four_moves() {
    let (mut timeline, boards) = record(&OPENING[..4]);
    assert_eq!(timeline.go_to_ply(0).unwrap(), &boards[1]);
    assert_eq!(timeline.moves().len(), 4);
}

#[test]
fn reset_after_mixed_operations() {
    let (mut timeline, _) = record(&OPENING);
    timeline.undo_last_exchange().unwrap();
    timeline.go_to_ply(1).unwrap();
    timeline.step_back().unwrap();
    timeline.reset();

    assert!(timeline.moves().is_empty());
    assert_eq!(timeline.snapshots(), &[Board::default()]);
    assert_eq!(timeline.cursor(), 0);
    assert!(!timeline.is_browsing());
}
