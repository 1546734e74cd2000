//! The state machine.

use super::config::{EventId, MachineConfig, StateId};
use super::error::MachineError;
use super::history::{History, TransitionCause, TransitionLog, TransitionRecord};
use chrono::Utc;
use tracing::debug;

/// A finite state machine over a declarative [`MachineConfig`].
///
/// The machine owns its configuration for its lifetime, tracks a single
/// current state, and keeps linear undo/redo stacks of previously-visited
/// states. Every operation is synchronous and atomic: validation happens
/// before any mutation, so a failing call leaves the machine untouched.
///
/// # Example
///
/// ```rust
/// use stateshift::core::{MachineConfig, StateConfig, StateMachine};
///
/// let config = MachineConfig::new(
///     "idle",
///     vec![
///         StateConfig::new("idle").with_transition("START", "running"),
///         StateConfig::new("running").with_transition("STOP", "idle"),
///     ],
/// );
///
/// let mut machine = StateMachine::new(config).unwrap();
/// assert_eq!(machine.current_state().as_str(), "idle");
///
/// machine.trigger("START").unwrap();
/// assert_eq!(machine.current_state().as_str(), "running");
///
/// assert!(machine.undo());
/// assert_eq!(machine.current_state().as_str(), "idle");
/// assert!(machine.redo());
/// assert_eq!(machine.current_state().as_str(), "running");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine {
    config: MachineConfig,
    current: StateId,
    history: History,
    log: TransitionLog,
}

impl StateMachine {
    /// Create a machine positioned on the configured initial state.
    ///
    /// Fails with [`MachineError::InvalidConfig`] when the configuration
    /// declares no states. The initial state itself is not checked against
    /// the declared states; a bogus initial only surfaces once a
    /// transition is attempted from it.
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        if config.is_empty() {
            return Err(MachineError::InvalidConfig);
        }

        let current = config.initial().clone();
        debug!(initial = %current, states = config.states().len(), "machine created");

        Ok(Self {
            config,
            current,
            history: History::new(),
            log: TransitionLog::new(),
        })
    }

    /// The current state. Never fails, no side effects.
    pub fn current_state(&self) -> &StateId {
        &self.current
    }

    /// The configuration the machine was built from.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Go directly to `state`, ignoring transition tables.
    ///
    /// Fails with [`MachineError::InvalidState`] when `state` is not
    /// declared. On success the previous state is pushed onto the undo
    /// stack and the redo stack is invalidated.
    pub fn change_state(&mut self, state: &str) -> Result<(), MachineError> {
        let Some(target) = self.config.state(state) else {
            return Err(MachineError::InvalidState(StateId::new(state)));
        };

        let target = target.name().clone();
        self.commit(target, TransitionCause::Explicit);
        Ok(())
    }

    /// Fire `event` against the current state's transition table.
    ///
    /// Fails with [`MachineError::InvalidEvent`] when the current state
    /// defines no transition for `event`, even if other states do. On
    /// success the machine lands on the transition's target, with the same
    /// history side effects as [`StateMachine::change_state`], and the new
    /// current state is returned.
    pub fn trigger(&mut self, event: &str) -> Result<&StateId, MachineError> {
        let target = self
            .config
            .state(self.current.as_str())
            .and_then(|s| s.target_for(event))
            .cloned()
            .ok_or_else(|| MachineError::InvalidEvent {
                event: EventId::new(event),
                state: self.current.clone(),
            })?;

        self.commit(target, TransitionCause::Event(EventId::new(event)));
        Ok(&self.current)
    }

    /// Go back to the configured initial state.
    ///
    /// The undo and redo stacks are left alone; use
    /// [`StateMachine::clear_history`] to drop them.
    pub fn reset(&mut self) {
        let previous = std::mem::replace(&mut self.current, self.config.initial().clone());
        debug!(from = %previous, to = %self.current, "reset");
        self.log = self.log.record(TransitionRecord {
            from: previous,
            to: self.current.clone(),
            cause: TransitionCause::Reset,
            timestamp: Utc::now(),
        });
    }

    /// State identifiers that define a transition for `event`, or every
    /// declared state when `event` is `None`. Declaration order either
    /// way.
    pub fn states(&self, event: Option<&str>) -> Vec<&StateId> {
        self.config
            .states()
            .iter()
            .filter(|s| event.is_none_or(|e| s.handles(e)))
            .map(|s| s.name())
            .collect()
    }

    /// Step back to the most recently left state.
    ///
    /// Returns `false` with no side effects when there is nothing to
    /// undo. Otherwise the current state moves onto the redo stack and the
    /// machine returns to the popped state.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(self.current.clone()) else {
            return false;
        };

        let from = std::mem::replace(&mut self.current, previous);
        debug!(from = %from, to = %self.current, "undo");
        self.log = self.log.record(TransitionRecord {
            from,
            to: self.current.clone(),
            cause: TransitionCause::Undo,
            timestamp: Utc::now(),
        });
        true
    }

    /// Step forward to the most recently undone state.
    ///
    /// Returns `false` with no side effects when there is nothing to
    /// redo. The undone entry is not pushed back onto the undo stack, so a
    /// redone state only becomes undo-able again after the next forward
    /// change.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo() else {
            return false;
        };

        let from = std::mem::replace(&mut self.current, next);
        debug!(from = %from, to = %self.current, "redo");
        self.log = self.log.record(TransitionRecord {
            from,
            to: self.current.clone(),
            cause: TransitionCause::Redo,
            timestamp: Utc::now(),
        });
        true
    }

    /// Whether an [`StateMachine::undo`] would succeed.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a [`StateMachine::redo`] would succeed.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Drop both history stacks. The current state is unchanged.
    pub fn clear_history(&mut self) {
        self.history.clear();
        debug!("history cleared");
    }

    /// The timestamped log of every current-state assignment.
    pub fn transition_log(&self) -> &TransitionLog {
        &self.log
    }

    /// Commit a forward state change: record the previous state in the
    /// undo stack (invalidating redo) and append to the log.
    fn commit(&mut self, target: StateId, cause: TransitionCause) {
        let previous = std::mem::replace(&mut self.current, target);
        debug!(from = %previous, to = %self.current, "state changed");
        self.history.record(previous.clone());
        self.log = self.log.record(TransitionRecord {
            from: previous,
            to: self.current.clone(),
            cause,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateConfig;

    fn start_stop_machine() -> StateMachine {
        let config = MachineConfig::new(
            "idle",
            vec![
                StateConfig::new("idle").with_transition("START", "running"),
                StateConfig::new("running")
                    .with_transition("STOP", "idle")
                    .with_transition("PAUSE", "paused"),
                StateConfig::new("paused")
                    .with_transition("RESUME", "running")
                    .with_transition("STOP", "idle"),
            ],
        );
        StateMachine::new(config).unwrap()
    }

    #[test]
    fn construction_rejects_empty_configuration() {
        let result = StateMachine::new(MachineConfig::new("idle", Vec::new()));
        assert_eq!(result.unwrap_err(), MachineError::InvalidConfig);
    }

    #[test]
    fn construction_starts_on_initial_state() {
        let machine = start_stop_machine();
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(!machine.can_undo());
        assert!(!machine.can_redo());
    }

    #[test]
    fn change_state_reaches_every_declared_state() {
        let mut machine = start_stop_machine();
        for name in ["idle", "running", "paused"] {
            machine.change_state(name).unwrap();
            assert_eq!(machine.current_state().as_str(), name);
        }
    }

    #[test]
    fn change_state_rejects_undeclared_state() {
        let mut machine = start_stop_machine();
        let err = machine.change_state("halted").unwrap_err();
        assert_eq!(err, MachineError::InvalidState(StateId::new("halted")));
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(!machine.can_undo());
    }

    #[test]
    fn trigger_follows_transition_table() {
        let mut machine = start_stop_machine();
        let state = machine.trigger("START").unwrap();
        assert_eq!(state.as_str(), "running");
    }

    #[test]
    fn trigger_rejects_event_defined_only_elsewhere() {
        // STOP exists for running and paused, but not for idle.
        let mut machine = start_stop_machine();
        let err = machine.trigger("STOP").unwrap_err();
        assert_eq!(
            err,
            MachineError::InvalidEvent {
                event: EventId::new("STOP"),
                state: StateId::new("idle"),
            }
        );
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(!machine.can_undo());
    }

    #[test]
    fn failed_trigger_leaves_history_untouched() {
        let mut machine = start_stop_machine();
        machine.trigger("START").unwrap();
        machine.undo();

        assert!(machine.can_redo());
        machine.trigger("BOGUS").unwrap_err();
        assert!(machine.can_redo());
    }

    #[test]
    fn forward_change_invalidates_redo() {
        let mut machine = start_stop_machine();
        machine.trigger("START").unwrap();
        machine.undo();
        assert!(machine.can_redo());

        machine.change_state("paused").unwrap();
        assert!(!machine.can_redo());
        assert!(!machine.redo());
    }

    #[test]
    fn undo_on_fresh_machine_is_a_no_op() {
        let mut machine = start_stop_machine();
        assert!(!machine.undo());
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(!machine.can_redo());
    }

    #[test]
    fn undo_then_redo_round_trips() {
        let mut machine = start_stop_machine();
        machine.trigger("START").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(machine.redo());
        assert_eq!(machine.current_state().as_str(), "running");

        // The redone entry was not pushed back onto the undo stack.
        assert!(!machine.can_undo());
    }

    #[test]
    fn reset_returns_to_initial_without_touching_history() {
        let mut machine = start_stop_machine();
        machine.trigger("START").unwrap();
        machine.trigger("PAUSE").unwrap();

        machine.reset();
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(machine.can_undo());

        // History still replays the pre-reset states.
        assert!(machine.undo());
        assert_eq!(machine.current_state().as_str(), "running");
    }

    #[test]
    fn clear_history_keeps_current_state() {
        let mut machine = start_stop_machine();
        machine.trigger("START").unwrap();
        machine.undo();

        machine.clear_history();
        assert_eq!(machine.current_state().as_str(), "idle");
        assert!(!machine.can_undo());
        assert!(!machine.can_redo());
    }

    #[test]
    fn states_without_event_lists_all_in_declaration_order() {
        let machine = start_stop_machine();
        let names: Vec<&str> = machine.states(None).iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["idle", "running", "paused"]);
    }

    #[test]
    fn states_with_event_filters_to_handlers() {
        let machine = start_stop_machine();

        let stop: Vec<&str> = machine
            .states(Some("STOP"))
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(stop, vec!["running", "paused"]);

        assert!(machine.states(Some("UNKNOWN")).is_empty());
    }

    #[test]
    fn undeclared_initial_state_fails_lazily() {
        let config = MachineConfig::new(
            "limbo",
            vec![StateConfig::new("idle").with_transition("START", "running")],
        );
        let mut machine = StateMachine::new(config).unwrap();

        // Construction trusts the caller; the bogus state is observable.
        assert_eq!(machine.current_state().as_str(), "limbo");

        // Triggering from it finds no transition table.
        let err = machine.trigger("START").unwrap_err();
        assert_eq!(
            err,
            MachineError::InvalidEvent {
                event: EventId::new("START"),
                state: StateId::new("limbo"),
            }
        );

        // Moving to a declared state recovers.
        machine.change_state("idle").unwrap();
        assert_eq!(machine.current_state().as_str(), "idle");
    }

    #[test]
    fn transition_log_records_every_assignment() {
        let mut machine = start_stop_machine();
        machine.trigger("START").unwrap();
        machine.change_state("paused").unwrap();
        machine.undo();
        machine.redo();
        machine.reset();

        let causes: Vec<&TransitionCause> = machine
            .transition_log()
            .records()
            .iter()
            .map(|r| &r.cause)
            .collect();

        assert_eq!(
            causes,
            vec![
                &TransitionCause::Event(EventId::new("START")),
                &TransitionCause::Explicit,
                &TransitionCause::Undo,
                &TransitionCause::Redo,
                &TransitionCause::Reset,
            ]
        );
    }

    #[test]
    fn worked_example_scenario() {
        let config = MachineConfig::new(
            "idle",
            vec![
                StateConfig::new("idle").with_transition("START", "running"),
                StateConfig::new("running").with_transition("STOP", "idle"),
            ],
        );
        let mut machine = StateMachine::new(config).unwrap();

        machine.trigger("START").unwrap();
        assert_eq!(machine.current_state().as_str(), "running");

        machine.trigger("STOP").unwrap();
        assert_eq!(machine.current_state().as_str(), "idle");

        assert!(machine.undo());
        assert_eq!(machine.current_state().as_str(), "running");

        assert!(machine.undo());
        assert_eq!(machine.current_state().as_str(), "idle");

        assert!(!machine.undo());
        assert_eq!(machine.current_state().as_str(), "idle");

        assert!(machine.redo());
        assert_eq!(machine.current_state().as_str(), "running");
    }
}
