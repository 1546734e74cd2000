//! Declarative machine configuration.
//!
//! A configuration is supplied fully formed at construction and never
//! mutated afterwards. States are kept in declaration order, which is
//! observable through [`crate::core::StateMachine::states`].

use serde::de::{self, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque identifier for a state.
///
/// Identifiers are compared by value and carry no meaning to the machine
/// beyond being keys of the configuration.
///
/// # Example
///
/// ```rust
/// use stateshift::core::StateId;
///
/// let id = StateId::new("idle");
/// assert_eq!(id.as_str(), "idle");
/// assert_eq!(id, StateId::from("idle"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

/// Opaque identifier for an event, scoped per-state as a key of that
/// state's transition table.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl StateId {
    /// Create a state identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EventId {
    /// Create an event identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single entry of a state's transition table: `event` moves the machine
/// to `target`.
#[derive(Clone, PartialEq, Debug)]
pub struct EventTransition {
    /// Event that triggers the transition.
    pub event: EventId,
    /// State the machine lands on.
    pub target: StateId,
}

/// One declared state: its name plus its event transition table.
///
/// The table keeps entries in declaration order; lookups are explicit
/// containment checks, so an absent event is simply `None`.
#[derive(Clone, PartialEq, Debug)]
pub struct StateConfig {
    name: StateId,
    transitions: Vec<EventTransition>,
}

impl StateConfig {
    /// Create a state with an empty transition table.
    pub fn new(name: impl Into<StateId>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    /// Add a transition, returning the updated state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stateshift::core::StateConfig;
    ///
    /// let idle = StateConfig::new("idle").with_transition("START", "running");
    /// assert!(idle.handles("START"));
    /// assert!(!idle.handles("STOP"));
    /// ```
    pub fn with_transition(
        mut self,
        event: impl Into<EventId>,
        target: impl Into<StateId>,
    ) -> Self {
        self.transitions.push(EventTransition {
            event: event.into(),
            target: target.into(),
        });
        self
    }

    /// The state's name.
    pub fn name(&self) -> &StateId {
        &self.name
    }

    /// The transition table, in declaration order.
    pub fn transitions(&self) -> &[EventTransition] {
        &self.transitions
    }

    /// Target state for `event`, if this state defines it.
    pub fn target_for(&self, event: &str) -> Option<&StateId> {
        self.transitions
            .iter()
            .find(|t| t.event.as_str() == event)
            .map(|t| &t.target)
    }

    /// Whether this state defines a transition for `event`.
    pub fn handles(&self, event: &str) -> bool {
        self.target_for(event).is_some()
    }
}

/// Immutable machine configuration: the initial state and the declared
/// states with their transition tables.
///
/// Serializes to and from the map-shaped document external callers
/// produce, preserving declaration order:
///
/// # Example
///
/// ```rust
/// use stateshift::core::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(
///     r#"{
///         "initial": "idle",
///         "states": {
///             "idle":    { "transitions": { "START": "running" } },
///             "running": { "transitions": { "STOP": "idle" } }
///         }
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.initial().as_str(), "idle");
/// assert_eq!(config.states().len(), 2);
/// assert!(config.contains("running"));
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct MachineConfig {
    initial: StateId,
    states: Vec<StateConfig>,
}

impl MachineConfig {
    /// Create a configuration from an initial state and declared states.
    pub fn new(initial: impl Into<StateId>, states: Vec<StateConfig>) -> Self {
        Self {
            initial: initial.into(),
            states,
        }
    }

    /// The configured initial state.
    pub fn initial(&self) -> &StateId {
        &self.initial
    }

    /// All declared states, in declaration order.
    pub fn states(&self) -> &[StateConfig] {
        &self.states
    }

    /// Look up a declared state by name.
    pub fn state(&self, name: &str) -> Option<&StateConfig> {
        self.states.iter().find(|s| s.name.as_str() == name)
    }

    /// Whether `name` is a declared state.
    pub fn contains(&self, name: &str) -> bool {
        self.state(name).is_some()
    }

    /// Whether the configuration declares no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

// Serde below maps the Vec-backed model onto the external document shape
// `{ initial, states: { name: { transitions: { event: target } } } }`.
// Map entries are visited in document order, so declaration order survives
// a round trip.

struct StatesMap<'a>(&'a [StateConfig]);

impl Serialize for StatesMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for state in self.0 {
            map.serialize_entry(&state.name, &StateBody(state))?;
        }
        map.end()
    }
}

struct StateBody<'a>(&'a StateConfig);

impl Serialize for StateBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("StateConfig", 1)?;
        body.serialize_field("transitions", &TransitionsMap(&self.0.transitions))?;
        body.end()
    }
}

struct TransitionsMap<'a>(&'a [EventTransition]);

impl Serialize for TransitionsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for transition in self.0 {
            map.serialize_entry(&transition.event, &transition.target)?;
        }
        map.end()
    }
}

impl Serialize for MachineConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut config = serializer.serialize_struct("MachineConfig", 2)?;
        config.serialize_field("initial", &self.initial)?;
        config.serialize_field("states", &StatesMap(&self.states))?;
        config.end()
    }
}

struct TransitionsDe(Vec<EventTransition>);

impl<'de> Deserialize<'de> for TransitionsDe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TransitionsVisitor;

        impl<'de> Visitor<'de> for TransitionsVisitor {
            type Value = TransitionsDe;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from event to target state")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut transitions = Vec::new();
                while let Some((event, target)) = map.next_entry::<EventId, StateId>()? {
                    transitions.push(EventTransition { event, target });
                }
                Ok(TransitionsDe(transitions))
            }
        }

        deserializer.deserialize_map(TransitionsVisitor)
    }
}

#[derive(Deserialize)]
struct StateBodyDe {
    transitions: TransitionsDe,
}

struct StatesDe(Vec<StateConfig>);

impl<'de> Deserialize<'de> for StatesDe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatesVisitor;

        impl<'de> Visitor<'de> for StatesVisitor {
            type Value = StatesDe;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from state name to state body")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut states = Vec::new();
                while let Some((name, body)) = map.next_entry::<StateId, StateBodyDe>()? {
                    states.push(StateConfig {
                        name,
                        transitions: body.transitions.0,
                    });
                }
                Ok(StatesDe(states))
            }
        }

        deserializer.deserialize_map(StatesVisitor)
    }
}

impl<'de> Deserialize<'de> for MachineConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        const FIELDS: &[&str] = &["initial", "states"];

        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = MachineConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a machine configuration with initial and states")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut initial: Option<StateId> = None;
                let mut states: Option<Vec<StateConfig>> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "initial" => {
                            if initial.is_some() {
                                return Err(de::Error::duplicate_field("initial"));
                            }
                            initial = Some(map.next_value()?);
                        }
                        "states" => {
                            if states.is_some() {
                                return Err(de::Error::duplicate_field("states"));
                            }
                            states = Some(map.next_value::<StatesDe>()?.0);
                        }
                        other => return Err(de::Error::unknown_field(other, FIELDS)),
                    }
                }

                Ok(MachineConfig {
                    initial: initial.ok_or_else(|| de::Error::missing_field("initial"))?,
                    states: states.ok_or_else(|| de::Error::missing_field("states"))?,
                })
            }
        }

        deserializer.deserialize_struct("MachineConfig", FIELDS, ConfigVisitor)
    }
}
