//! The trigger decision pipeline.
//!
//! ## Key Components
//!
//! - [`TriggerConfig`]: parsed parameters handed over by the host
//! - [`Directive`]: classified on/off directive texts
//! - [`UseCounter`]: use limiting with falloff decay
//! - [`FailureSampler`]: probabilistic suppression gate
//! - [`TriggerEngine`]: orchestrates the above per activation event
//!
//! ## Design Philosophy
//!
//! The engine decides *whether and how* to respond to an activation; it
//! never decides *what* activates it, and it never touches the host's
//! object graph. Everything external arrives through the `ports` traits.
//!
//! ## Example Usage
//!
//! ```
//! use sim_trigger::core::{ActivationEvent, Direction, ObjectId, SimRng};
//! use sim_trigger::ports::{EvalContext, MapNameResolver, RecordingSink, StaticTargets};
//! use sim_trigger::trigger::{TriggerConfig, TriggerEngine};
//!
//! let names = MapNameResolver::new().with_object("FireStim", ObjectId::new(-42));
//! let targets = StaticTargets::new()
//!     .with_destination("&ControlDevice", [ObjectId::new(5)]);
//!
//! let config = TriggerConfig::new().with_on_directive("[2.0]FireStim");
//! let mut engine = TriggerEngine::new(ObjectId::new(1), config, SimRng::new(42), &names, 0);
//!
//! let mut sink = RecordingSink::new();
//! let fired = engine.evaluate(
//!     Direction::On,
//!     &ActivationEvent::at(100),
//!     &mut EvalContext::new(&targets, &mut sink),
//! );
//!
//! assert!(fired);
//! assert_eq!(sink.len(), 1);
//! ```

mod config;
mod counter;
mod directive;
mod engine;
mod sampler;

pub use config::{CountMode, TriggerConfig};
pub use counter::{CountCheck, UseCounter};
pub use directive::{Directive, DirectiveKind, DirectivePair};
pub use engine::TriggerEngine;
pub use sampler::FailureSampler;
