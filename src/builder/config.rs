//! Builders for machine configurations.

use crate::builder::error::BuildError;
use crate::core::{EventId, MachineConfig, StateConfig, StateId, StateMachine};

/// Builder for a single state's transition table.
pub struct StateBuilder {
    name: StateId,
    transitions: Vec<(EventId, StateId)>,
}

impl StateBuilder {
    /// Start building a state.
    pub fn new(name: impl Into<StateId>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    /// Declare that `event` moves this state to `target`.
    pub fn on(mut self, event: impl Into<EventId>, target: impl Into<StateId>) -> Self {
        self.transitions.push((event.into(), target.into()));
        self
    }

    fn into_config(self) -> Result<StateConfig, BuildError> {
        for (i, (event, _)) in self.transitions.iter().enumerate() {
            if self.transitions[..i].iter().any(|(e, _)| e == event) {
                return Err(BuildError::DuplicateEvent {
                    state: self.name,
                    event: event.clone(),
                });
            }
        }

        let mut state = StateConfig::new(self.name);
        for (event, target) in self.transitions {
            state = state.with_transition(event, target);
        }
        Ok(state)
    }
}

/// Builder for constructing machine configurations with a fluent API.
///
/// Like direct construction, the builder does not check that the initial
/// state is itself declared; an undeclared initial only surfaces when a
/// transition is attempted from it.
///
/// # Example
///
/// ```rust
/// use stateshift::builder::{ConfigBuilder, StateBuilder};
///
/// let mut machine = ConfigBuilder::new()
///     .initial("idle")
///     .state(StateBuilder::new("idle").on("START", "running"))
///     .state(StateBuilder::new("running").on("STOP", "idle"))
///     .build_machine()
///     .unwrap();
///
/// machine.trigger("START").unwrap();
/// assert_eq!(machine.current_state().as_str(), "running");
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    initial: Option<StateId>,
    states: Vec<StateBuilder>,
}

impl ConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state.
    pub fn state(mut self, state: StateBuilder) -> Self {
        self.states.push(state);
        self
    }

    /// Build the configuration.
    /// Returns an error on missing fields or duplicate declarations.
    pub fn build(self) -> Result<MachineConfig, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut states = Vec::with_capacity(self.states.len());
        for builder in self.states {
            let state = builder.into_config()?;
            if states
                .iter()
                .any(|s: &StateConfig| s.name() == state.name())
            {
                return Err(BuildError::DuplicateState(state.name().clone()));
            }
            states.push(state);
        }

        Ok(MachineConfig::new(initial, states))
    }

    /// Build the configuration and a machine on top of it.
    pub fn build_machine(self) -> Result<StateMachine, BuildError> {
        let config = self.build()?;
        // Machine construction only rejects an empty configuration, which
        // build() has already ruled out.
        StateMachine::new(config).map_err(|_| BuildError::NoStates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_initial_state() {
        let result = ConfigBuilder::new()
            .state(StateBuilder::new("idle"))
            .build();
        assert_eq!(result.unwrap_err(), BuildError::MissingInitialState);
    }

    #[test]
    fn builder_requires_states() {
        let result = ConfigBuilder::new().initial("idle").build();
        assert_eq!(result.unwrap_err(), BuildError::NoStates);
    }

    #[test]
    fn fluent_api_builds_config() {
        let config = ConfigBuilder::new()
            .initial("idle")
            .state(StateBuilder::new("idle").on("START", "running"))
            .state(StateBuilder::new("running").on("STOP", "idle"))
            .build()
            .unwrap();

        assert_eq!(config.initial().as_str(), "idle");
        assert_eq!(config.states().len(), 2);
        assert_eq!(
            config.state("idle").unwrap().target_for("START"),
            Some(&StateId::new("running"))
        );
    }

    #[test]
    fn duplicate_states_are_rejected() {
        let result = ConfigBuilder::new()
            .initial("idle")
            .state(StateBuilder::new("idle"))
            .state(StateBuilder::new("idle").on("START", "running"))
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateState(StateId::new("idle"))
        );
    }

    #[test]
    fn duplicate_events_within_a_state_are_rejected() {
        let result = ConfigBuilder::new()
            .initial("idle")
            .state(
                StateBuilder::new("idle")
                    .on("START", "running")
                    .on("START", "paused"),
            )
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateEvent {
                state: StateId::new("idle"),
                event: EventId::new("START"),
            }
        );
    }

    #[test]
    fn same_event_on_different_states_is_fine() {
        let config = ConfigBuilder::new()
            .initial("a")
            .state(StateBuilder::new("a").on("NEXT", "b"))
            .state(StateBuilder::new("b").on("NEXT", "a"))
            .build();

        assert!(config.is_ok());
    }

    #[test]
    fn build_machine_starts_on_initial() {
        let machine = ConfigBuilder::new()
            .initial("idle")
            .state(StateBuilder::new("idle").on("START", "running"))
            .state(StateBuilder::new("running"))
            .build_machine()
            .unwrap();

        assert_eq!(machine.current_state().as_str(), "idle");
    }

    #[test]
    fn undeclared_initial_is_not_rejected() {
        // Validation stays lazy, matching direct construction.
        let config = ConfigBuilder::new()
            .initial("limbo")
            .state(StateBuilder::new("idle"))
            .build();

        assert!(config.is_ok());
    }
}
