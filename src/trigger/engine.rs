//! Trigger evaluation.
//!
//! The engine owns the mutable state of one trigger (use counter, failure
//! sampler, RNG) and its immutable configuration (classified directives,
//! destination specifier, count mode). Each inbound activation runs the
//! same pipeline:
//!
//! 1. Failure gate: a suppressed attempt stops here and is never counted.
//! 2. Use counter: falloff, optional count, limit check.
//! 3. Target resolution and per-target dispatch.
//!
//! Every outcome along the way is an expected business state, not an
//! error; the engine reports a plain `fired` boolean and narrates its
//! decisions at debug level.

use tracing::{debug, warn};

use crate::core::{ActivationEvent, Direction, ObjectId, SimRng, TriggerEvent};
use crate::ports::{EvalContext, NameResolver};

use super::config::{CountMode, TriggerConfig};
use super::counter::UseCounter;
use super::directive::{Directive, DirectiveKind, DirectivePair};
use super::sampler::FailureSampler;

/// The decision core of one trigger.
pub struct TriggerEngine {
    self_id: ObjectId,
    directives: DirectivePair,
    destination: String,
    remove_links: bool,
    count_mode: CountMode,
    counter: UseCounter,
    sampler: FailureSampler,
    rng: SimRng,
}

impl TriggerEngine {
    /// Build an engine at simulation time `time`.
    ///
    /// Both directives are classified here, exactly once; the name
    /// resolver is not needed afterwards.
    pub fn new(
        self_id: ObjectId,
        config: TriggerConfig,
        rng: SimRng,
        names: &dyn NameResolver,
        time: u64,
    ) -> Self {
        let directives = DirectivePair::new(
            Directive::classify(config.off_directive, names),
            Directive::classify(config.on_directive, names),
        );

        let mut sampler = FailureSampler::new(config.fail_chance);
        if let Some(var) = config.fail_chance_var {
            sampler = sampler.with_override(var);
        }

        let engine = Self {
            self_id,
            directives,
            destination: config.destination,
            remove_links: config.remove_links,
            count_mode: config.count_mode,
            counter: UseCounter::new(time, 0, config.count_limit, config.falloff_ms, config.limited),
            sampler,
            rng,
        };

        debug!(
            id = %engine.self_id,
            on = engine.directives[Direction::On].text(),
            off = engine.directives[Direction::Off].text(),
            destination = %engine.destination,
            remove_links = engine.remove_links,
            "trigger initialised"
        );
        debug!(
            on_is_stimulus = engine.directives[Direction::On].is_stimulus(),
            off_is_stimulus = engine.directives[Direction::Off].is_stimulus(),
            limit = config.count_limit,
            falloff_ms = config.falloff_ms,
            count_mode = ?engine.count_mode,
            "trigger gating configured"
        );

        engine
    }

    /// Route an inbound host message.
    ///
    /// Activations run the evaluation pipeline; `ResetCount` resets the
    /// use counter outside it and never fires.
    pub fn handle(&mut self, event: &TriggerEvent, ctx: &mut EvalContext<'_>) -> bool {
        match event {
            TriggerEvent::TurnOn(ev) => self.evaluate(Direction::On, ev, ctx),
            TriggerEvent::TurnOff(ev) => self.evaluate(Direction::Off, ev, ctx),
            TriggerEvent::ResetCount { time } => {
                self.counter.reset(*time);
                debug!(id = %self.self_id, "trigger count reset to 0");
                false
            }
        }
    }

    /// Run one directional evaluation.
    ///
    /// Returns whether the trigger fired. Firing with an empty target set
    /// is still a firing: the attempt was already counted.
    pub fn evaluate(
        &mut self,
        direction: Direction,
        event: &ActivationEvent,
        ctx: &mut EvalContext<'_>,
    ) -> bool {
        debug!(id = %self.self_id, %direction, "doing trigger");

        // Failed attempts must not be counted, so the gate runs first
        if self.sampler.should_fail(&mut self.rng, ctx.variables) {
            debug!(id = %self.self_id, "trigger suppressed by failure chance");
            return false;
        }

        let amount = if self.count_mode.counts(direction) { 1 } else { 0 };
        if !self.counter.increment(event.time, amount).passed() {
            let (current, limit) = self.counter.counts();
            warn!(id = %self.self_id, current, limit, "count exceeded, ignoring trigger");
            return false;
        }

        let (current, limit) = self.counter.counts();
        debug!(id = %self.self_id, current, limit, "count passed, doing trigger");

        let targets = ctx.targets.resolve(&self.destination, event);
        if targets.is_empty() {
            warn!(id = %self.self_id, destination = %self.destination, "no targets found for trigger");
            return true;
        }

        let directive = &self.directives[direction];
        for &target in &targets {
            match directive.kind() {
                DirectiveKind::Stimulus { archetype, intensity } => {
                    debug!(id = %self.self_id, %target, %archetype, intensity, "stimulating target");
                    ctx.sink.stimulate(target, archetype, intensity, self.self_id);
                }
                DirectiveKind::Notification => {
                    debug!(id = %self.self_id, %target, text = directive.text(), "sending notification");
                    ctx.sink.post_notification(target, directive.text());
                }
            }
        }

        if self.remove_links {
            ctx.sink.sever_links(self.self_id, &self.destination);
        }

        true
    }

    /// Reset the use counter.
    pub fn reset_count(&mut self, time: u64) {
        self.counter.reset(time);
    }

    /// This trigger's own object ID.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.self_id
    }

    /// The classified directive for `direction`.
    #[must_use]
    pub fn directive(&self, direction: Direction) -> &Directive {
        &self.directives[direction]
    }

    /// The destination specifier.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Read-only snapshot of `(current, limit)` from the use counter.
    #[must_use]
    pub fn counts(&self) -> (i32, i32) {
        self.counter.counts()
    }
}
