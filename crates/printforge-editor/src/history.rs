//! Undo/redo timeline over opaque scene snapshots.
//!
//! The manager holds two stacks and one live current snapshot. It is
//! format-agnostic: snapshots are stored and replayed verbatim, never
//! inspected or validated. One consequence the snapshot consumer must
//! honor: effect overlays are owner-relative derived objects, so any
//! restore that recreates an owner has to re-bind its overlays by
//! id-prefix lookup (`effects::rebind_all_overlays`) instead of trusting
//! the restored overlay geometry.

use printforge_core::{event_bus, AppEvent, HistoryEvent};

/// An opaque serialized representation of the full scene at a point in
/// time. Only the snapshot codec interprets the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Wraps raw serialized scene content.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw serialized content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Append-only-until-pruned undo/redo timeline.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    current: Snapshot,
}

impl HistoryManager {
    /// Creates a timeline whose irreducible baseline is `initial`.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current: initial,
        }
    }

    /// The snapshot the scene currently reflects.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Commits a new state. The previous current state becomes undoable
    /// and any redo branch is invalidated: a change after an undo makes
    /// the undone future unreachable.
    pub fn push_state(&mut self, next: Snapshot) {
        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(previous);
        self.redo_stack.clear();
        event_bus()
            .publish(AppEvent::History(HistoryEvent::StatePushed {
                undo_depth: self.undo_stack.len(),
            }))
            .ok();
    }

    /// Steps back one state. Returns false at the boundary with no
    /// mutation.
    pub fn undo(&mut self) -> bool {
        self.undo_with(|_| {})
    }

    /// Steps back one state, invoking `on_restore` with the restored
    /// snapshot after the stacks have moved, so the caller can re-hydrate
    /// the scene from it.
    pub fn undo_with<F>(&mut self, on_restore: F) -> bool
    where
        F: FnOnce(&Snapshot),
    {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        on_restore(&self.current);
        event_bus()
            .publish(AppEvent::History(HistoryEvent::Undone {
                undo_depth: self.undo_stack.len(),
                redo_depth: self.redo_stack.len(),
            }))
            .ok();
        true
    }

    /// Steps forward one state. Returns false at the boundary with no
    /// mutation.
    pub fn redo(&mut self) -> bool {
        self.redo_with(|_| {})
    }

    /// Steps forward one state, invoking `on_restore` with the restored
    /// snapshot.
    pub fn redo_with<F>(&mut self, on_restore: F) -> bool
    where
        F: FnOnce(&Snapshot),
    {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(undone);
        on_restore(&self.current);
        event_bus()
            .publish(AppEvent::History(HistoryEvent::Redone {
                undo_depth: self.undo_stack.len(),
                redo_depth: self.redo_stack.len(),
            }))
            .ok();
        true
    }

    /// Empties both stacks, keeping the current snapshot as the new
    /// irreducible baseline. Used after bulk loads such as opening a
    /// saved document.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        event_bus()
            .publish(AppEvent::History(HistoryEvent::Cleared))
            .ok();
    }

    /// Number of states that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of states that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// True if undo would succeed.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True if redo would succeed.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
