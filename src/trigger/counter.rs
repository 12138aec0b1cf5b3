//! Use counting with falloff decay.
//!
//! A trigger may be limited to a number of uses. The counter tracks how
//! many qualifying activations have happened, optionally decaying one unit
//! per elapsed falloff interval, and reports whether an attempt stays
//! within the limit.
//!
//! Counting and gating are decoupled: an evaluation whose direction does
//! not count still runs falloff and the limit check, it just adds nothing.

use serde::{Deserialize, Serialize};

/// Outcome of a limit check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountCheck {
    /// Within the limit (or unlimited); the trigger may fire.
    Passed,
    /// The limit is exceeded; the trigger must not fire.
    Exceeded,
}

impl CountCheck {
    /// Check if the attempt passed.
    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Stateful use counter with optional falloff and limit.
///
/// `current` never goes negative. Decrements only happen through falloff,
/// one unit per whole elapsed interval; partial intervals persist across
/// calls because the internal clock advances by consumed intervals rather
/// than to wall time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCounter {
    current: i32,
    limit: i32,
    falloff_ms: u64,
    falloff_active: bool,
    limited: bool,
    last_update: u64,
}

impl UseCounter {
    /// Create a counter at `time` with the given configuration.
    ///
    /// A non-positive `limit` is unlimited even when `limited` is set;
    /// a zero `falloff_ms` disables decay.
    #[must_use]
    pub fn new(time: u64, start: i32, limit: i32, falloff_ms: u64, limited: bool) -> Self {
        Self {
            current: start.max(0),
            limit,
            falloff_ms,
            falloff_active: falloff_ms > 0,
            limited,
            last_update: time,
        }
    }

    /// Reset the count to zero and rebase the falloff clock to `time`.
    pub fn reset(&mut self, time: u64) {
        self.current = 0;
        self.last_update = time;
    }

    /// Apply falloff, add `amount` (0 or 1), and check the limit.
    ///
    /// Falloff and the limit check run even when `amount` is zero.
    pub fn increment(&mut self, time: u64, amount: i32) -> CountCheck {
        if self.falloff_active && time > self.last_update {
            let intervals = (time - self.last_update) / self.falloff_ms;
            if intervals > 0 {
                let decay = i32::try_from(intervals).unwrap_or(i32::MAX);
                self.current = self.current.saturating_sub(decay).max(0);
                self.last_update += intervals * self.falloff_ms;
            }
        }

        self.current = self.current.saturating_add(amount).max(0);

        if self.limited && self.limit > 0 && self.current > self.limit {
            CountCheck::Exceeded
        } else {
            CountCheck::Passed
        }
    }

    /// Read-only snapshot of `(current, limit)`.
    #[must_use]
    pub fn counts(&self) -> (i32, i32) {
        (self.current, self.limit)
    }
}
