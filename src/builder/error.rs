//! Build errors for configuration builders.

use crate::core::{EventId, StateId};
use thiserror::Error;

/// Errors that can occur when building a machine configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states declared. Add at least one state")]
    NoStates,

    #[error("State {0} declared more than once")]
    DuplicateState(StateId),

    #[error("Event {event} declared more than once for state {state}")]
    DuplicateEvent { state: StateId, event: EventId },
}
