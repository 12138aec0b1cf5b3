//! Core types: object identifiers, events, RNG.
//!
//! These are the host-agnostic building blocks the trigger engine is built
//! from. Hosts configure behavior via `trigger::TriggerConfig` rather than
//! modifying the core.

pub mod event;
pub mod object;
pub mod rng;

pub use event::{ActivationEvent, Direction, TriggerEvent};
pub use object::ObjectId;
pub use rng::{SimRng, SimRngState};
