//! Undo/redo timeline tests

use printforge_editor::{HistoryManager, Snapshot};
use proptest::prelude::*;

fn snap(label: &str) -> Snapshot {
    Snapshot::new(label)
}

#[test]
fn test_round_trip() {
    let mut history = HistoryManager::new(snap("s0"));
    for i in 1..=5 {
        history.push_state(snap(&format!("s{}", i)));
    }
    assert_eq!(history.current().as_str(), "s5");

    for _ in 0..5 {
        assert!(history.undo());
    }
    assert_eq!(history.current().as_str(), "s0");
    assert!(!history.undo());

    for _ in 0..5 {
        assert!(history.redo());
    }
    assert_eq!(history.current().as_str(), "s5");
    assert!(!history.redo());
}

#[test]
fn test_branch_invalidation() {
    let mut history = HistoryManager::new(snap("base"));
    history.push_state(snap("a"));
    history.push_state(snap("b"));
    assert!(history.undo());
    assert_eq!(history.current().as_str(), "a");

    history.push_state(snap("c"));
    // "b" is unreachable the instant a new change lands after an undo.
    assert!(!history.redo());
    assert_eq!(history.current().as_str(), "c");
}

#[test]
fn test_boundary_no_ops_leave_state_untouched() {
    let mut history = HistoryManager::new(snap("only"));
    assert!(!history.undo());
    assert!(!history.redo());
    assert_eq!(history.current().as_str(), "only");
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 0);
}

#[test]
fn test_clear_history_keeps_current() {
    let mut history = HistoryManager::new(snap("s0"));
    history.push_state(snap("s1"));
    history.push_state(snap("s2"));
    assert!(history.undo());

    history.clear_history();
    assert_eq!(history.current().as_str(), "s1");
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_restore_callback_sees_restored_snapshot() {
    let mut history = HistoryManager::new(snap("s0"));
    history.push_state(snap("s1"));

    let mut seen = String::new();
    assert!(history.undo_with(|s| seen = s.as_str().to_string()));
    assert_eq!(seen, "s0");

    assert!(history.redo_with(|s| seen = s.as_str().to_string()));
    assert_eq!(seen, "s1");
}

proptest! {
    #[test]
    fn prop_n_undos_return_to_baseline(n in 1usize..24) {
        let mut history = HistoryManager::new(snap("baseline"));
        for i in 0..n {
            history.push_state(snap(&format!("state-{}", i)));
        }
        for _ in 0..n {
            prop_assert!(history.undo());
        }
        prop_assert_eq!(history.current().as_str(), "baseline");
        prop_assert!(!history.undo());
    }

    #[test]
    fn prop_depths_are_conserved(ops in proptest::collection::vec(0u8..3, 1..40)) {
        let mut history = HistoryManager::new(snap("base"));
        let mut pushes = 0usize;
        for op in ops {
            match op {
                0 => {
                    history.push_state(snap("x"));
                    pushes += 1;
                }
                1 => {
                    history.undo();
                }
                _ => {
                    history.redo();
                }
            }
            // Every pushed state lives on exactly one side of the cursor
            // until a new push prunes the redo branch.
            prop_assert!(history.undo_depth() + history.redo_depth() <= pushes);
        }
    }
}
