//! Probabilistic suppression of trigger firings.
//!
//! Each evaluation may be suppressed outright before anything else runs,
//! governed by a configured percentage. The check draws a single uniform
//! roll in 1..=100; a zero chance skips the draw entirely and always fires.
//! Suppressed attempts are never counted against the use limit, which is
//! why this gate runs first.
//!
//! The percentage may be overridden at evaluation time by a host runtime
//! variable, letting missions tune trigger reliability without re-parsing
//! configuration.

use serde::{Deserialize, Serialize};

use crate::core::SimRng;
use crate::ports::VariableSource;

/// Probabilistic gate deciding whether a firing attempt is suppressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSampler {
    chance: i32,
    override_var: Option<String>,
}

impl FailureSampler {
    /// Create a sampler with a fixed percent chance (0-100).
    #[must_use]
    pub fn new(chance: i32) -> Self {
        Self {
            chance,
            override_var: None,
        }
    }

    /// Name a runtime variable that overrides the chance (builder pattern).
    #[must_use]
    pub fn with_override(mut self, var: impl Into<String>) -> Self {
        self.override_var = Some(var.into());
        self
    }

    /// The chance in effect for one evaluation.
    ///
    /// The override variable wins when configured and present; otherwise
    /// the fixed chance applies.
    #[must_use]
    pub fn effective_chance(&self, variables: Option<&dyn VariableSource>) -> i32 {
        self.override_var
            .as_deref()
            .and_then(|name| variables.and_then(|vars| vars.get_int(name)))
            .unwrap_or(self.chance)
    }

    /// Decide whether this attempt is suppressed.
    ///
    /// Consumes one roll from `rng` unless the effective chance is zero;
    /// a zero chance always fires. A non-zero chance suppresses exactly
    /// when the roll exceeds it.
    pub fn should_fail(&self, rng: &mut SimRng, variables: Option<&dyn VariableSource>) -> bool {
        let chance = self.effective_chance(variables);
        chance != 0 && rng.roll_percent() > chance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StaticVariables;

    #[test]
    fn test_zero_chance_never_fails() {
        let sampler = FailureSampler::new(0);
        let mut rng = SimRng::new(42);

        for _ in 0..500 {
            assert!(!sampler.should_fail(&mut rng, None));
        }
    }

    #[test]
    fn test_zero_chance_consumes_no_randomness() {
        let sampler = FailureSampler::new(0);
        let mut rng = SimRng::new(42);
        let before = rng.state();

        sampler.should_fail(&mut rng, None);

        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_full_chance_never_fails() {
        // Rolls never exceed 100, so a chance of 100 always fires
        let sampler = FailureSampler::new(100);
        let mut rng = SimRng::new(42);

        for _ in 0..500 {
            assert!(!sampler.should_fail(&mut rng, None));
        }
    }

    #[test]
    fn test_low_chance_suppresses_sometimes() {
        let sampler = FailureSampler::new(1);
        let mut rng = SimRng::new(42);

        // A chance of 1 fires only on a roll of exactly 1
        let suppressed = (0..500).filter(|_| sampler.should_fail(&mut rng, None)).count();
        assert!(suppressed > 400);
    }

    #[test]
    fn test_nonzero_chance_consumes_one_roll() {
        let sampler = FailureSampler::new(50);
        let mut rng1 = SimRng::new(7);
        let mut rng2 = SimRng::new(7);

        sampler.should_fail(&mut rng1, None);
        rng2.roll_percent();

        assert_eq!(rng1.state(), rng2.state());
    }

    #[test]
    fn test_override_variable_wins() {
        let sampler = FailureSampler::new(50).with_override("quarrel_chance");
        let vars = StaticVariables::new().with_variable("quarrel_chance", 0);
        let mut rng = SimRng::new(42);

        // Override of zero disables suppression regardless of the fixed chance
        for _ in 0..100 {
            assert!(!sampler.should_fail(&mut rng, Some(&vars)));
        }
    }

    #[test]
    fn test_missing_override_falls_back() {
        let sampler = FailureSampler::new(0).with_override("quarrel_chance");
        let vars = StaticVariables::new();

        assert_eq!(sampler.effective_chance(Some(&vars)), 0);
        assert_eq!(sampler.effective_chance(None), 0);
    }

    #[test]
    fn test_effective_chance_reads_variable() {
        let sampler = FailureSampler::new(10).with_override("quarrel_chance");
        let vars = StaticVariables::new().with_variable("quarrel_chance", 75);

        assert_eq!(sampler.effective_chance(Some(&vars)), 75);
        assert_eq!(sampler.effective_chance(None), 10);
    }
}
