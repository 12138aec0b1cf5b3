//! Activation events delivered by the host.
//!
//! The host's message system decides *what* reaches a trigger; this module
//! only defines the records a trigger consumes. An event carries a timestamp
//! (milliseconds of simulation time) and optionally the object that caused
//! the activation.
//!
//! `TriggerEvent` is the full inbound message: a directional activation
//! request or the special count-reset message, which is handled outside the
//! evaluation pipeline.

use serde::{Deserialize, Serialize};

use super::ObjectId;

/// Direction of an activation request.
///
/// Triggers carry one directive per direction; the direction also decides
/// whether an attempt counts toward the use limit (see `CountMode`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A "turn off" request.
    Off,
    /// A "turn on" request.
    On,
}

impl Direction {
    /// Index into per-direction storage: off = 0, on = 1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "Off"),
            Self::On => write!(f, "On"),
        }
    }
}

/// An inbound activation record.
///
/// Carries the simulation timestamp of the stimulus and, when known, the
/// object that produced it. Target resolvers may use the source to expand
/// context-dependent destination specifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationEvent {
    /// Simulation time in milliseconds.
    pub time: u64,

    /// The object that caused the activation, if known.
    pub source: Option<ObjectId>,
}

impl ActivationEvent {
    /// Create an event at the given simulation time.
    #[must_use]
    pub const fn at(time: u64) -> Self {
        Self { time, source: None }
    }

    /// Set the causing object (builder pattern).
    #[must_use]
    pub const fn with_source(mut self, source: ObjectId) -> Self {
        self.source = Some(source);
        self
    }
}

/// A message delivered to a trigger by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// Request the "on" directive.
    TurnOn(ActivationEvent),
    /// Request the "off" directive.
    TurnOff(ActivationEvent),
    /// Reset the use counter to zero. Never fires anything.
    ResetCount {
        /// Simulation time in milliseconds.
        time: u64,
    },
}

impl TriggerEvent {
    /// The direction this event requests, if it is an activation.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::TurnOn(_) => Some(Direction::On),
            Self::TurnOff(_) => Some(Direction::Off),
            Self::ResetCount { .. } => None,
        }
    }

    /// The simulation time the event was delivered at.
    #[must_use]
    pub const fn time(&self) -> u64 {
        match self {
            Self::TurnOn(ev) | Self::TurnOff(ev) => ev.time,
            Self::ResetCount { time } => *time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_index() {
        assert_eq!(Direction::Off.index(), 0);
        assert_eq!(Direction::On.index(), 1);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(format!("{}", Direction::On), "On");
        assert_eq!(format!("{}", Direction::Off), "Off");
    }

    #[test]
    fn test_event_builder() {
        let event = ActivationEvent::at(1500).with_source(ObjectId::new(9));

        assert_eq!(event.time, 1500);
        assert_eq!(event.source, Some(ObjectId::new(9)));
    }

    #[test]
    fn test_trigger_event_direction() {
        let ev = ActivationEvent::at(10);

        assert_eq!(TriggerEvent::TurnOn(ev).direction(), Some(Direction::On));
        assert_eq!(TriggerEvent::TurnOff(ev).direction(), Some(Direction::Off));
        assert_eq!(TriggerEvent::ResetCount { time: 10 }.direction(), None);
    }

    #[test]
    fn test_trigger_event_time() {
        let ev = ActivationEvent::at(250);

        assert_eq!(TriggerEvent::TurnOn(ev).time(), 250);
        assert_eq!(TriggerEvent::ResetCount { time: 99 }.time(), 99);
    }

    #[test]
    fn test_event_serialization() {
        let event = TriggerEvent::TurnOn(ActivationEvent::at(42).with_source(ObjectId::new(3)));
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: TriggerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
