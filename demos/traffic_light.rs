//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Declarative configuration via the machine_config! macro
//! - Event-driven transitions
//! - Cyclic state transitions (states repeat)
//!
//! Run with: cargo run --example traffic_light

use stateshift::core::StateMachine;
use stateshift::machine_config;

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let config = machine_config! {
        initial: "red",
        states: {
            "red"    => { "GO" => "green" },
            "green"  => { "CAUTION" => "yellow" },
            "yellow" => { "STOP" => "red" },
        }
    };

    let mut machine = StateMachine::new(config).unwrap();
    println!("Initial state: {}\n", machine.current_state());

    println!("Transition sequence:");
    for event in ["GO", "CAUTION", "STOP", "GO"] {
        let state = machine.trigger(event).unwrap().clone();
        println!("  {:<8} -> {}", event, state);
    }

    println!("\nEvents are scoped to the current state:");
    match machine.trigger("GO") {
        Ok(state) => println!("  GO -> {state}"),
        Err(err) => println!("  GO rejected: {err}"),
    }

    println!("\nStates handling STOP: {:?}", machine.states(Some("STOP")));
    println!("All states:           {:?}", machine.states(None));

    println!("\n=== Example Complete ===");
}
