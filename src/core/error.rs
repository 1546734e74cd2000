//! Machine errors.

use super::config::{EventId, StateId};
use thiserror::Error;

/// Errors raised by [`crate::core::StateMachine`] operations.
///
/// Every error is returned synchronously to the caller at the offending
/// call; nothing is recovered or retried internally, and a failing
/// operation performs no mutation at all.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MachineError {
    #[error("configuration declares no states")]
    InvalidConfig,

    #[error("unknown state: {0}")]
    InvalidState(StateId),

    #[error("no transition for event {event} in state {state}")]
    InvalidEvent { event: EventId, state: StateId },
}
