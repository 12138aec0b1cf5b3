//! Trigger engine integration tests.
//!
//! These tests drive the full evaluation pipeline with map-backed
//! collaborators: failure gate, use counting with falloff, target
//! resolution, and per-target dispatch.

use std::cell::Cell;

use sim_trigger::core::{ActivationEvent, Direction, ObjectId, SimRng, TriggerEvent};
use sim_trigger::ports::{
    DispatchedEffect, EvalContext, MapNameResolver, RecordingSink, StaticTargets, StaticVariables,
    TargetResolver, TargetSet,
};
use sim_trigger::trigger::{CountMode, TriggerConfig, TriggerEngine};

const TRIGGER_ID: ObjectId = ObjectId(1);
const FIRE_ARROW: ObjectId = ObjectId(-42);

fn names() -> MapNameResolver {
    MapNameResolver::new()
        .with_object("FireArrow", FIRE_ARROW)
        .with_object("Door1", ObjectId::new(17))
}

fn engine(config: TriggerConfig) -> TriggerEngine {
    TriggerEngine::new(TRIGGER_ID, config, SimRng::new(42), &names(), 0)
}

/// Target resolver that counts how often it is consulted.
struct CountingTargets {
    inner: StaticTargets,
    hits: Cell<usize>,
}

impl CountingTargets {
    fn new(inner: StaticTargets) -> Self {
        Self {
            inner,
            hits: Cell::new(0),
        }
    }
}

impl TargetResolver for CountingTargets {
    fn resolve(&self, destination: &str, event: &ActivationEvent) -> TargetSet {
        self.hits.set(self.hits.get() + 1);
        self.inner.resolve(destination, event)
    }
}

/// Every target receives the notification, in resolver order, verbatim.
#[test]
fn test_notification_reaches_all_targets_in_order() {
    let mut engine = engine(TriggerConfig::new().with_on_directive("Open"));
    let targets = StaticTargets::new().with_destination(
        "&ControlDevice",
        [ObjectId::new(5), ObjectId::new(3), ObjectId::new(9)],
    );
    let mut sink = RecordingSink::new();

    let fired = engine.evaluate(
        Direction::On,
        &ActivationEvent::at(100),
        &mut EvalContext::new(&targets, &mut sink),
    );

    assert!(fired);
    let received: Vec<_> = sink
        .effects
        .iter()
        .map(|effect| match effect {
            DispatchedEffect::Notification { target, text } => (target.raw(), text.clone()),
            other => panic!("unexpected effect: {:?}", other),
        })
        .collect();
    assert_eq!(
        received,
        vec![
            (5, "Open".to_string()),
            (3, "Open".to_string()),
            (9, "Open".to_string()),
        ]
    );
}

/// A stimulus directive never produces notifications, and vice versa.
#[test]
fn test_dispatch_selection_is_exclusive() {
    let config = TriggerConfig::new()
        .with_on_directive("[3.5]FireArrow")
        .with_off_directive("Douse");
    let mut engine = engine(config);
    let targets =
        StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5), ObjectId::new(9)]);
    let mut sink = RecordingSink::new();

    engine.evaluate(
        Direction::On,
        &ActivationEvent::at(100),
        &mut EvalContext::new(&targets, &mut sink),
    );

    assert_eq!(sink.len(), 2);
    for effect in &sink.effects {
        match effect {
            DispatchedEffect::Stimulate {
                archetype,
                intensity,
                source,
                ..
            } => {
                assert_eq!(*archetype, FIRE_ARROW);
                assert_eq!(*intensity, 3.5);
                assert_eq!(*source, TRIGGER_ID);
            }
            other => panic!("expected only stimulations, got {:?}", other),
        }
    }

    sink.clear();
    engine.evaluate(
        Direction::Off,
        &ActivationEvent::at(200),
        &mut EvalContext::new(&targets, &mut sink),
    );

    for effect in &sink.effects {
        assert!(matches!(effect, DispatchedEffect::Notification { text, .. } if text == "Douse"));
    }
}

/// Duplicate targets are dispatched to twice; no deduplication.
#[test]
fn test_duplicate_targets_not_deduplicated() {
    let mut engine = engine(TriggerConfig::new());
    let targets = StaticTargets::new()
        .with_destination("&ControlDevice", [ObjectId::new(5), ObjectId::new(5)]);
    let mut sink = RecordingSink::new();

    engine.evaluate(
        Direction::On,
        &ActivationEvent::at(100),
        &mut EvalContext::new(&targets, &mut sink),
    );

    assert_eq!(sink.len(), 2);
}

/// Once the use limit is exceeded the trigger stops firing and the target
/// resolver is no longer consulted.
#[test]
fn test_use_limit_blocks_firing() {
    let config = TriggerConfig::new()
        .with_use_limit(2)
        .with_count_mode(CountMode::OnOnly);
    let mut engine = engine(config);
    let targets = CountingTargets::new(
        StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]),
    );
    let mut sink = RecordingSink::new();

    let mut ctx = EvalContext::new(&targets, &mut sink);
    assert!(engine.evaluate(Direction::On, &ActivationEvent::at(10), &mut ctx));
    assert!(engine.evaluate(Direction::On, &ActivationEvent::at(20), &mut ctx));
    assert_eq!(engine.counts(), (2, 2));

    // Third attempt exceeds the limit: no dispatch, no target resolution
    assert!(!engine.evaluate(Direction::On, &ActivationEvent::at(30), &mut ctx));
    assert_eq!(targets.hits.get(), 2);
    assert_eq!(sink.len(), 2);
}

/// Directions excluded from the count mode do not consume uses.
#[test]
fn test_uncounted_direction_fires_past_limit() {
    let config = TriggerConfig::new()
        .with_use_limit(1)
        .with_count_mode(CountMode::OnOnly);
    let mut engine = engine(config);
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let mut sink = RecordingSink::new();
    let mut ctx = EvalContext::new(&targets, &mut sink);

    assert!(engine.evaluate(Direction::On, &ActivationEvent::at(10), &mut ctx));

    // Off requests are uncounted and keep firing
    for time in [20, 30, 40] {
        assert!(engine.evaluate(Direction::Off, &ActivationEvent::at(time), &mut ctx));
    }
    assert_eq!(engine.counts(), (1, 1));

    // A second counted request is over the limit
    assert!(!engine.evaluate(Direction::On, &ActivationEvent::at(50), &mut ctx));
}

/// Suppressed attempts never reach the counter: over many evaluations the
/// count matches the number of successful firings exactly.
#[test]
fn test_suppressed_attempts_are_not_counted() {
    // A chance of 1 suppresses on any roll above 1
    let config = TriggerConfig::new().with_fail_chance(1);
    let mut engine = engine(config);
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let mut sink = RecordingSink::new();
    let mut ctx = EvalContext::new(&targets, &mut sink);

    let mut fired_count = 0;
    for i in 0..300 {
        if engine.evaluate(Direction::On, &ActivationEvent::at(i * 10), &mut ctx) {
            fired_count += 1;
        }
    }

    assert_eq!(engine.counts().0, fired_count);
    assert!(fired_count < 300);
}

/// A zero failure chance always fires.
#[test]
fn test_zero_chance_always_fires() {
    let mut engine = engine(TriggerConfig::new());
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let mut sink = RecordingSink::new();
    let mut ctx = EvalContext::new(&targets, &mut sink);

    for i in 0..100 {
        assert!(engine.evaluate(Direction::On, &ActivationEvent::at(i), &mut ctx));
    }
}

/// The runtime variable overrides the configured failure chance.
#[test]
fn test_fail_chance_override_variable() {
    // Configured to always roll the gate; the override disables it
    let config = TriggerConfig::new()
        .with_fail_chance(1)
        .with_fail_chance_var("quarrel_chance");
    let mut engine = engine(config);
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let vars = StaticVariables::new().with_variable("quarrel_chance", 0);
    let mut sink = RecordingSink::new();

    for i in 0..100 {
        let mut ctx = EvalContext::new(&targets, &mut sink).with_variables(&vars);
        assert!(engine.evaluate(Direction::On, &ActivationEvent::at(i), &mut ctx));
    }
}

/// Falloff decay re-opens a limited trigger after enough time passes.
#[test]
fn test_falloff_reopens_limited_trigger() {
    let config = TriggerConfig::new().with_use_limit(1).with_falloff(1000);
    let mut engine = engine(config);
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let mut sink = RecordingSink::new();
    let mut ctx = EvalContext::new(&targets, &mut sink);

    assert!(engine.evaluate(Direction::On, &ActivationEvent::at(0), &mut ctx));
    assert!(!engine.evaluate(Direction::On, &ActivationEvent::at(500), &mut ctx));

    // 1.5s later one interval has decayed; the trigger fits again
    assert!(engine.evaluate(Direction::On, &ActivationEvent::at(2000), &mut ctx));
}

/// ResetCount is handled outside the evaluation pipeline and re-arms the
/// use limit.
#[test]
fn test_reset_count_rearms_trigger() {
    let config = TriggerConfig::new().with_use_limit(1);
    let mut engine = engine(config);
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let mut sink = RecordingSink::new();
    let mut ctx = EvalContext::new(&targets, &mut sink);

    assert!(engine.handle(&TriggerEvent::TurnOn(ActivationEvent::at(10)), &mut ctx));
    assert!(!engine.handle(&TriggerEvent::TurnOn(ActivationEvent::at(20)), &mut ctx));

    // Reset never fires, but the next attempt fits again
    assert!(!engine.handle(&TriggerEvent::ResetCount { time: 30 }, &mut ctx));
    assert!(engine.handle(&TriggerEvent::TurnOn(ActivationEvent::at(40)), &mut ctx));
}

/// A directive that fails stimulus classification falls back to a verbatim
/// notification end to end.
#[test]
fn test_malformed_stimulus_degrades_to_notification() {
    // Door1 resolves to a live instance, so this is not a stimulus
    let config = TriggerConfig::new().with_on_directive("[3.5]Door1");
    let mut engine = engine(config);
    let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
    let mut sink = RecordingSink::new();

    engine.evaluate(
        Direction::On,
        &ActivationEvent::at(10),
        &mut EvalContext::new(&targets, &mut sink),
    );

    assert_eq!(
        sink.effects,
        vec![DispatchedEffect::Notification {
            target: ObjectId::new(5),
            text: "[3.5]Door1".to_string(),
        }]
    );
}

/// Link removal is signalled once, after dispatch, only when configured
/// and only when something was dispatched.
#[test]
fn test_link_removal_signal() {
    let config = TriggerConfig::new().removing_links();
    let mut engine = engine(config);
    let targets =
        StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5), ObjectId::new(9)]);
    let mut sink = RecordingSink::new();

    engine.evaluate(
        Direction::On,
        &ActivationEvent::at(10),
        &mut EvalContext::new(&targets, &mut sink),
    );

    let sever_count = sink
        .effects
        .iter()
        .filter(|effect| matches!(effect, DispatchedEffect::SeverLinks { .. }))
        .count();
    assert_eq!(sever_count, 1);
    assert!(matches!(
        sink.effects.last(),
        Some(DispatchedEffect::SeverLinks { .. })
    ));
}

/// Engine behavior is fully deterministic given a seed.
#[test]
fn test_determinism_across_engines() {
    let run = || {
        let config = TriggerConfig::new().with_fail_chance(50);
        let mut engine = engine(config);
        let targets = StaticTargets::new().with_destination("&ControlDevice", [ObjectId::new(5)]);
        let mut sink = RecordingSink::new();
        let mut ctx = EvalContext::new(&targets, &mut sink);

        (0..50)
            .map(|i| engine.evaluate(Direction::On, &ActivationEvent::at(i * 100), &mut ctx))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}
