//! Builder API for ergonomic configuration construction.
//!
//! This module provides fluent builders and a macro for declaring machine
//! configurations with minimal boilerplate, with duplicate detection the
//! raw configuration model does not perform.

pub mod config;
pub mod error;
pub mod macros;

pub use config::{ConfigBuilder, StateBuilder};
pub use error::BuildError;

use crate::core::MachineConfig;

/// Build a linear chain of states where `event` advances to the next one.
///
/// The first state is the initial state; the last state has an empty
/// transition table.
///
/// # Panics
///
/// Panics if `states` is empty.
///
/// # Example
///
/// ```
/// use stateshift::builder::chain;
/// use stateshift::core::StateMachine;
///
/// let config = chain(&["draft", "review", "published"], "ADVANCE");
/// let mut machine = StateMachine::new(config).unwrap();
///
/// machine.trigger("ADVANCE").unwrap();
/// machine.trigger("ADVANCE").unwrap();
/// assert_eq!(machine.current_state().as_str(), "published");
/// ```
pub fn chain(states: &[&str], event: &str) -> MachineConfig {
    let mut builder = ConfigBuilder::new();
    for (i, name) in states.iter().enumerate() {
        let mut state = StateBuilder::new(*name);
        if let Some(next) = states.get(i + 1) {
            state = state.on(event, *next);
        }
        if i == 0 {
            builder = builder.initial(*name);
        }
        builder = builder.state(state);
    }
    builder
        .build()
        .expect("A chain of one or more states always builds")
}
