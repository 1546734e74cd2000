//! Undo/redo history and the transition log.
//!
//! Two separate concerns live here. [`History`] is the pair of linear
//! stacks that back `undo`/`redo` on the machine. [`TransitionLog`] is an
//! append-only, timestamped record of every assignment to the current
//! state, kept for observability only; it never feeds undo/redo.

use super::config::{EventId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Linear undo/redo stacks over previously-visited states.
///
/// Most-recent entries sit at the end of each stack. A fresh forward
/// state change invalidates the redo stack; `undo` moves the current
/// state onto it. `redo` only drains its stack: a redone state becomes
/// undo-able again only once a later forward change records it.
///
/// # Example
///
/// ```rust
/// use stateshift::core::{History, StateId};
///
/// let mut history = History::new();
/// assert!(!history.can_undo());
///
/// history.record(StateId::new("idle"));
/// assert_eq!(history.undo_depth(), 1);
///
/// let previous = history.undo(StateId::new("running")).unwrap();
/// assert_eq!(previous.as_str(), "idle");
/// assert!(history.can_redo());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    undo: Vec<StateId>,
    redo: Vec<StateId>,
}

impl History {
    /// Create empty undo and redo stacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a forward state change: push the state that was just left
    /// onto the undo stack and invalidate the redo stack.
    pub fn record(&mut self, previous: StateId) {
        self.undo.push(previous);
        self.redo.clear();
    }

    /// Step backwards: move `current` onto the redo stack and pop the
    /// state to return to. `None` when the undo stack is empty, in which
    /// case nothing changes.
    pub fn undo(&mut self, current: StateId) -> Option<StateId> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forwards: pop the state to return to. The popped entry is not
    /// pushed back onto the undo stack. `None` when the redo stack is
    /// empty.
    pub fn redo(&mut self) -> Option<StateId> {
        self.redo.pop()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Whether an `undo` would succeed.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a `redo` would succeed.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of states available to undo.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of states available to redo.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

/// What caused a current-state assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// An event fired through `trigger`.
    Event(EventId),
    /// A direct `change_state` call.
    Explicit,
    /// A successful `undo`.
    Undo,
    /// A successful `redo`.
    Redo,
    /// A `reset` back to the initial state.
    Reset,
}

/// Record of a single current-state assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left.
    pub from: StateId,
    /// The state being entered.
    pub to: StateId,
    /// What caused the assignment.
    pub cause: TransitionCause,
    /// When the assignment happened.
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of current-state assignments.
///
/// Recording returns a new log rather than mutating in place.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use stateshift::core::{StateId, TransitionCause, TransitionLog, TransitionRecord};
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: StateId::new("idle"),
///     to: StateId::new("running"),
///     cause: TransitionCause::Explicit,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.records().len(), 1);
/// let path = log.path();
/// assert_eq!(path, vec![&StateId::new("idle"), &StateId::new("running")]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning the extended log.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The sequence of states visited: the `from` of the first record,
    /// then the `to` of every record. Empty when nothing was recorded.
    pub fn path(&self) -> Vec<&StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Elapsed time between the first and last record, `None` when the
    /// log is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
