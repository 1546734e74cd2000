//! Document Editor Workflow
//!
//! This example demonstrates linear undo/redo over a publishing workflow.
//!
//! Key concepts:
//! - Fluent configuration via ConfigBuilder
//! - Undo/redo navigation through previously-visited states
//! - The timestamped transition log
//!
//! Run with: cargo run --example document_editor

use stateshift::builder::{ConfigBuilder, StateBuilder};

fn main() {
    println!("=== Document Editor Workflow ===\n");

    let mut machine = ConfigBuilder::new()
        .initial("draft")
        .state(StateBuilder::new("draft").on("SUBMIT", "review"))
        .state(
            StateBuilder::new("review")
                .on("APPROVE", "published")
                .on("REJECT", "draft"),
        )
        .state(StateBuilder::new("published").on("RETRACT", "draft"))
        .build_machine()
        .unwrap();

    println!("Starting in: {}", machine.current_state());

    machine.trigger("SUBMIT").unwrap();
    machine.trigger("APPROVE").unwrap();
    println!("After SUBMIT, APPROVE: {}\n", machine.current_state());

    println!("Stepping backwards:");
    while machine.undo() {
        println!("  undo -> {}", machine.current_state());
    }

    println!("\nStepping forwards:");
    while machine.redo() {
        println!("  redo -> {}", machine.current_state());
    }

    println!("\nNote the asymmetry: redo does not refill the undo stack,");
    println!("so the machine can undo again only after a fresh transition.");
    println!("can_undo: {}", machine.can_undo());

    machine.trigger("RETRACT").unwrap();
    println!("\nAfter RETRACT: {}", machine.current_state());
    println!("can_undo: {}", machine.can_undo());

    println!("\nTransition log:");
    for record in machine.transition_log().records() {
        println!(
            "  {} -> {} ({:?})",
            record.from, record.to, record.cause
        );
    }

    println!("\n=== Example Complete ===");
}
