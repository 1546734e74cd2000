//! Core state machine types and logic.
//!
//! This module contains everything the machine itself needs:
//! - Identifier newtypes and the declarative configuration model
//! - The undo/redo [`History`] stacks and the [`TransitionLog`]
//! - The [`StateMachine`] and its error taxonomy

mod config;
mod error;
mod history;
mod machine;

pub use config::{EventId, EventTransition, MachineConfig, StateConfig, StateId};
pub use error::MachineError;
pub use history::{History, TransitionCause, TransitionLog, TransitionRecord};
pub use machine::StateMachine;
