//! Stateshift: a declarative finite state machine with linear undo/redo
//!
//! A machine is built from an immutable configuration — an initial state
//! plus a per-state table of event-driven transitions — and tracks a
//! single current state. Every successful state change is recorded in a
//! pair of linear history stacks, enabling backward/forward navigation
//! with `undo` and `redo`.
//!
//! # Core Concepts
//!
//! - **Configuration**: declarative [`core::MachineConfig`], supplied
//!   fully formed at construction and never mutated
//! - **Transitions**: `trigger` follows the current state's table;
//!   `change_state` jumps directly to any declared state
//! - **History**: linear undo/redo stacks over previously-visited states,
//!   plus a timestamped [`core::TransitionLog`] for observability
//!
//! # Example
//!
//! ```rust
//! use stateshift::builder::{ConfigBuilder, StateBuilder};
//!
//! let mut machine = ConfigBuilder::new()
//!     .initial("idle")
//!     .state(StateBuilder::new("idle").on("START", "running"))
//!     .state(StateBuilder::new("running").on("STOP", "idle"))
//!     .build_machine()
//!     .unwrap();
//!
//! machine.trigger("START").unwrap();
//! assert_eq!(machine.current_state().as_str(), "running");
//!
//! assert!(machine.undo());
//! assert_eq!(machine.current_state().as_str(), "idle");
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use builder::{BuildError, ConfigBuilder, StateBuilder};
pub use core::{EventId, MachineConfig, MachineError, StateConfig, StateId, StateMachine};
