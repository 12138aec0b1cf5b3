//! Host collaborator interfaces.
//!
//! The engine never talks to the host's object system directly. Everything
//! it needs from outside comes through four small traits:
//!
//! - [`NameResolver`]: map an object name to an identifier
//! - [`TargetResolver`]: expand a destination specifier into a target set
//! - [`EffectSink`]: deliver stimulate / notification effects
//! - [`VariableSource`]: read runtime variables (failure-chance overrides)
//!
//! Map-backed implementations are provided for hosts with static object
//! tables and for tests; real hosts typically adapt their own services.
//!
//! ## Design Philosophy
//!
//! Collaborators are injected, never global. Name resolution is only needed
//! at engine construction (directive classification happens once); the
//! per-evaluation collaborators travel together in an [`EvalContext`].

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{ActivationEvent, ObjectId};

/// The set of objects one evaluation should affect.
///
/// Produced fresh per evaluation and never retained between evaluations.
/// Most destination specifiers expand to a handful of objects, so the
/// inline capacity avoids heap allocation in the common case.
pub type TargetSet = SmallVec<[ObjectId; 4]>;

/// Maps a textual object name to an identifier.
///
/// Archetypes resolve to negative IDs, live instances to non-negative IDs.
/// Returns `None` when no object carries the name.
pub trait NameResolver {
    /// Look up an object by name.
    fn object_named(&self, name: &str) -> Option<ObjectId>;
}

/// Expands a destination specifier into the current target set.
///
/// The specifier syntax is host-defined (link queries, radius searches,
/// literal names); the engine treats it as opaque. The triggering event is
/// available for context-dependent specifiers.
pub trait TargetResolver {
    /// Resolve the targets for one evaluation. May be empty.
    fn resolve(&self, destination: &str, event: &ActivationEvent) -> TargetSet;
}

/// Receives the effects a firing trigger produces.
///
/// All methods are fire-and-forget; the engine never consumes a return
/// value. Delivery order follows the target set's iteration order.
pub trait EffectSink {
    /// Apply a simulated stimulus to `target`.
    fn stimulate(&mut self, target: ObjectId, archetype: ObjectId, intensity: f32, source: ObjectId);

    /// Post a literal notification to `target`.
    fn post_notification(&mut self, target: ObjectId, text: &str);

    /// Signal that the links behind `destination` should be severed.
    ///
    /// Link state belongs to the host; the engine only raises the signal.
    fn sever_links(&mut self, _source: ObjectId, _destination: &str) {}
}

/// Reads host runtime variables.
///
/// Used for the failure-chance override: when the configured variable is
/// present, its value replaces the configured percentage at evaluation time.
pub trait VariableSource {
    /// Look up an integer variable by name.
    fn get_int(&self, name: &str) -> Option<i32>;
}

/// The per-evaluation collaborators, bundled.
pub struct EvalContext<'a> {
    /// Expands the destination specifier into targets.
    pub targets: &'a dyn TargetResolver,
    /// Receives dispatched effects.
    pub sink: &'a mut dyn EffectSink,
    /// Runtime variable lookup, if the host provides one.
    pub variables: Option<&'a dyn VariableSource>,
}

impl<'a> EvalContext<'a> {
    /// Create a context with the required collaborators.
    pub fn new(targets: &'a dyn TargetResolver, sink: &'a mut dyn EffectSink) -> Self {
        Self {
            targets,
            sink,
            variables: None,
        }
    }

    /// Add a variable source (builder pattern).
    #[must_use]
    pub fn with_variables(mut self, variables: &'a dyn VariableSource) -> Self {
        self.variables = Some(variables);
        self
    }
}

/// Name resolver backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MapNameResolver {
    names: FxHashMap<String, ObjectId>,
}

impl MapNameResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object name.
    pub fn insert(&mut self, name: impl Into<String>, id: ObjectId) {
        self.names.insert(name.into(), id);
    }

    /// Register an object name (builder pattern).
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>, id: ObjectId) -> Self {
        self.insert(name, id);
        self
    }
}

impl NameResolver for MapNameResolver {
    fn object_named(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }
}

/// Target resolver backed by a static destination table.
///
/// Ignores the triggering event; every lookup of a destination returns the
/// same targets in insertion order.
#[derive(Clone, Debug, Default)]
pub struct StaticTargets {
    table: FxHashMap<String, Vec<ObjectId>>,
}

impl StaticTargets {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the targets for a destination specifier.
    pub fn set(&mut self, destination: impl Into<String>, targets: impl IntoIterator<Item = ObjectId>) {
        self.table
            .insert(destination.into(), targets.into_iter().collect());
    }

    /// Set the targets for a destination specifier (builder pattern).
    #[must_use]
    pub fn with_destination(
        mut self,
        destination: impl Into<String>,
        targets: impl IntoIterator<Item = ObjectId>,
    ) -> Self {
        self.set(destination, targets);
        self
    }
}

impl TargetResolver for StaticTargets {
    fn resolve(&self, destination: &str, _event: &ActivationEvent) -> TargetSet {
        self.table
            .get(destination)
            .map(|targets| targets.iter().copied().collect())
            .unwrap_or_default()
    }
}

/// Variable source backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct StaticVariables {
    values: FxHashMap<String, i32>,
}

impl StaticVariables {
    /// Create an empty variable table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value.
    pub fn set(&mut self, name: impl Into<String>, value: i32) {
        self.values.insert(name.into(), value);
    }

    /// Set a variable value (builder pattern).
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: i32) -> Self {
        self.set(name, value);
        self
    }
}

impl VariableSource for StaticVariables {
    fn get_int(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }
}

/// An effect delivered through a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchedEffect {
    /// A simulated stimulus was applied.
    Stimulate {
        /// Object receiving the stimulus.
        target: ObjectId,
        /// Stimulus archetype applied.
        archetype: ObjectId,
        /// Stimulus intensity.
        intensity: f32,
        /// Object the stimulus came from.
        source: ObjectId,
    },
    /// A literal notification was posted.
    Notification {
        /// Object receiving the notification.
        target: ObjectId,
        /// Notification payload, verbatim.
        text: String,
    },
    /// A link-removal signal was raised.
    SeverLinks {
        /// Object whose links should be severed.
        source: ObjectId,
        /// Destination specifier the links were resolved from.
        destination: String,
    },
}

/// Effect sink that records everything it receives, in order.
///
/// Useful for tests and for hosts that batch effect delivery.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Effects in delivery order.
    pub effects: Vec<DispatchedEffect>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Drop all recorded effects.
    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl EffectSink for RecordingSink {
    fn stimulate(&mut self, target: ObjectId, archetype: ObjectId, intensity: f32, source: ObjectId) {
        self.effects.push(DispatchedEffect::Stimulate {
            target,
            archetype,
            intensity,
            source,
        });
    }

    fn post_notification(&mut self, target: ObjectId, text: &str) {
        self.effects.push(DispatchedEffect::Notification {
            target,
            text: text.to_string(),
        });
    }

    fn sever_links(&mut self, source: ObjectId, destination: &str) {
        self.effects.push(DispatchedEffect::SeverLinks {
            source,
            destination: destination.to_string(),
        });
    }
}
