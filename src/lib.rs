//! # sim-trigger
//!
//! A stateful trigger evaluation engine for scripted-object simulations.
//!
//! A trigger is an invisible helper object wired to other objects in a
//! simulated world. When the host delivers an activation or deactivation
//! stimulus, the trigger decides whether to fire, which side-effect to
//! emit (a literal notification or a simulated physical stimulus), and
//! which objects to affect.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: Name lookup, target resolution, variable lookup,
//!    and effect delivery are collaborator traits injected by the host.
//!    No globals, no singletons.
//!
//! 2. **Expected Outcomes, Not Errors**: Suppressed-by-chance,
//!    suppressed-by-limit, no-targets-found, and not-a-stimulus fallback
//!    are all ordinary business states reported as plain values.
//!
//! 3. **Deterministic**: The suppression RNG is seeded and serializable,
//!    so a host can replay or checkpoint trigger behavior exactly.
//!
//! ## Evaluation Pipeline
//!
//! ```text
//! activation event
//!     -> failure gate (probabilistic; suppressed attempts are not counted)
//!     -> use counter  (falloff decay, optional count, limit check)
//!     -> target resolution (fresh set per evaluation)
//!     -> per-target dispatch (stimulate or post notification)
//! ```
//!
//! ## Modules
//!
//! - `core`: Object IDs, activation events, deterministic RNG
//! - `ports`: Host collaborator traits and map-backed implementations
//! - `trigger`: Configuration, directive classification, use counting,
//!   failure sampling, and the evaluation engine

pub mod core;
pub mod ports;
pub mod trigger;

// Re-export commonly used types
pub use crate::core::{ActivationEvent, Direction, ObjectId, SimRng, SimRngState, TriggerEvent};

pub use crate::ports::{
    DispatchedEffect, EffectSink, EvalContext, MapNameResolver, NameResolver, RecordingSink,
    StaticTargets, StaticVariables, TargetResolver, TargetSet, VariableSource,
};

pub use crate::trigger::{
    CountCheck, CountMode, Directive, DirectiveKind, DirectivePair, FailureSampler, TriggerConfig,
    TriggerEngine, UseCounter,
};
