//! Macros for ergonomic configuration construction.

/// Build a [`crate::core::MachineConfig`] from a literal description.
///
/// States and transitions keep the order they are written in. Duplicates
/// are not checked; use [`crate::builder::ConfigBuilder`] when validation
/// matters.
///
/// # Example
///
/// ```
/// use stateshift::machine_config;
/// use stateshift::core::StateMachine;
///
/// let config = machine_config! {
///     initial: "idle",
///     states: {
///         "idle"    => { "START" => "running" },
///         "running" => { "STOP" => "idle" },
///     }
/// };
///
/// let mut machine = StateMachine::new(config).unwrap();
/// machine.trigger("START").unwrap();
/// assert_eq!(machine.current_state().as_str(), "running");
/// ```
#[macro_export]
macro_rules! machine_config {
    (
        initial: $initial:expr,
        states: {
            $(
                $state:expr => {
                    $( $event:expr => $target:expr ),* $(,)?
                }
            ),* $(,)?
        } $(,)?
    ) => {
        $crate::core::MachineConfig::new(
            $initial,
            vec![
                $(
                    $crate::core::StateConfig::new($state)
                        $( .with_transition($event, $target) )*
                ),*
            ],
        )
    };
}
