//! Tests for the linear undo/redo history.
mod common;
use common::*;
use flowdraft::prelude::*;

fn future_of<T: Clone>(history: &History<T>) -> Vec<T> {
    history.future().cloned().collect()
}

#[test]
fn test_new_history_has_nothing_to_undo_or_redo() {
    let history = History::new(0);
    assert_eq!(*history.present(), 0);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.len(), 1);
}

#[test]
fn test_three_sets_then_two_undos_then_redo() {
    let (i, s1, s2, s3) = (
        snapshot_with_nodes(0),
        snapshot_with_nodes(1),
        snapshot_with_nodes(2),
        snapshot_with_nodes(3),
    );
    let mut history = History::new(i.clone());
    history.set(s1.clone());
    history.set(s2.clone());
    history.set(s3.clone());

    assert!(history.undo());
    assert!(history.undo());
    assert_eq!(history.present(), &s1);
    assert_eq!(history.past(), &[i.clone()]);
    assert_eq!(future_of(&history), vec![s2.clone(), s3.clone()]);

    assert!(history.redo());
    assert_eq!(history.present(), &s2);
    assert_eq!(history.past(), &[i, s1]);
    assert_eq!(future_of(&history), vec![s3]);
}

#[test]
fn test_undo_on_empty_past_is_a_no_op() {
    let mut history = History::new("initial");
    assert!(!history.undo());
    assert_eq!(*history.present(), "initial");
    assert!(history.past().is_empty());
    assert_eq!(history.future().len(), 0);
}

#[test]
fn test_redo_on_empty_future_is_a_no_op() {
    let mut history = History::new(1);
    history.set(2);
    assert!(!history.redo());
    assert_eq!(*history.present(), 2);
    assert_eq!(history.past(), &[1]);
}

#[test]
fn test_undo_then_redo_restores_present() {
    let mut history = History::new(snapshot_with_nodes(0));
    for n in 1..=4 {
        history.set(snapshot_with_nodes(n));
    }
    let before = history.present().clone();
    assert!(history.undo());
    assert!(history.redo());
    assert_eq!(history.present(), &before);
    assert!(!history.can_redo());
}

#[test]
fn test_set_after_undo_clears_future() {
    let mut history = History::new("a");
    history.set("b");
    history.set("c");
    assert!(history.undo());
    assert!(history.can_redo());

    history.set("x");
    assert!(!history.can_redo());
    assert!(!history.redo());
    assert_eq!(*history.present(), "x");
    assert_eq!(history.past(), &["a", "b"]);
}

#[test]
fn test_set_with_equal_value_still_records_an_entry() {
    let mut history = History::new(7);
    history.set(7);
    assert!(history.can_undo());
    assert_eq!(history.past(), &[7]);
}

#[test]
fn test_length_is_preserved_across_undo_and_redo() {
    let mut history = History::new(0);
    for v in 1..=5 {
        history.set(v);
    }
    assert_eq!(history.len(), 6);

    let moves = [true, true, false, true, true, true, false, false];
    for undo in moves {
        if undo {
            history.undo();
        } else {
            history.redo();
        }
        assert_eq!(history.len(), 6);
        assert!((0..=5).contains(history.present()));
    }
}

#[test]
fn test_present_never_appears_in_past_or_future() {
    let mut history = History::new(0);
    for v in 1..=3 {
        history.set(v);
    }
    history.undo();
    history.undo();
    let present = *history.present();
    assert!(!history.past().contains(&present));
    assert!(history.future().all(|v| *v != present));
}

#[test]
fn test_history_limit_drops_oldest_entries() {
    let mut history = History::with_limit(0, HistoryLimit::MaxPast(2));
    for v in 1..=5 {
        history.set(v);
    }
    assert_eq!(history.past(), &[3, 4]);
    assert_eq!(*history.present(), 5);

    assert!(history.undo());
    assert!(history.undo());
    assert!(!history.undo());
    assert_eq!(*history.present(), 3);
    assert_eq!(future_of(&history), vec![4, 5]);
}

#[test]
fn test_unbounded_history_keeps_everything() {
    let mut history = History::new(0);
    for v in 1..=500 {
        history.set(v);
    }
    assert_eq!(history.limit(), HistoryLimit::Unbounded);
    assert_eq!(history.past().len(), 500);
}

#[test]
fn test_clear_keeps_present() {
    let mut history = History::new(0);
    history.set(1);
    history.set(2);
    history.undo();
    history.clear();
    assert_eq!(*history.present(), 1);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}
