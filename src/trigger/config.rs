//! Trigger configuration.
//!
//! Hosts parse their own parameter format (design notes, data files) and
//! hand the engine a `TriggerConfig` of already-parsed values. The engine
//! never sees the textual form.
//!
//! Defaults match the conventional script parameters: directives `"TurnOff"`
//! / `"TurnOn"`, destination `"&ControlDevice"`, no failure chance, no use
//! limit, both directions counted.

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// Which activation directions count toward the use limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountMode {
    /// No direction counts; the counter only moves through falloff.
    Neither,
    /// Only "turn on" requests count.
    OnOnly,
    /// Only "turn off" requests count.
    OffOnly,
    /// Both directions count.
    #[default]
    Both,
}

impl CountMode {
    /// Check whether an activation in `direction` counts.
    #[must_use]
    pub const fn counts(self, direction: Direction) -> bool {
        match (self, direction) {
            (Self::Both, _) => true,
            (Self::OnOnly, Direction::On) => true,
            (Self::OffOnly, Direction::Off) => true,
            _ => false,
        }
    }
}

/// Parsed configuration for one trigger.
///
/// Produced by the host's parameter source; consumed once at engine
/// construction. Directive texts are classified at that point and the
/// classification never changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Directive for "turn off" requests.
    pub off_directive: String,

    /// Directive for "turn on" requests.
    pub on_directive: String,

    /// Destination specifier handed to the target resolver.
    pub destination: String,

    /// Signal link removal after a successful dispatch.
    pub remove_links: bool,

    /// Percent chance (0-100) that an attempt is suppressed outright.
    pub fail_chance: i32,

    /// Runtime variable overriding `fail_chance` when present.
    pub fail_chance_var: Option<String>,

    /// Use limit. Only enforced when `limited` is set and the value is
    /// positive.
    pub count_limit: i32,

    /// Falloff interval in milliseconds. Zero disables decay.
    pub falloff_ms: u64,

    /// Whether the use limit is enforced at all.
    pub limited: bool,

    /// Which directions count toward the limit.
    pub count_mode: CountMode,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            off_directive: "TurnOff".to_string(),
            on_directive: "TurnOn".to_string(),
            destination: "&ControlDevice".to_string(),
            remove_links: false,
            fail_chance: 0,
            fail_chance_var: None,
            count_limit: 0,
            falloff_ms: 0,
            limited: false,
            count_mode: CountMode::Both,
        }
    }
}

impl TriggerConfig {
    /// Create a configuration with the conventional defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the "turn on" directive (builder pattern).
    #[must_use]
    pub fn with_on_directive(mut self, directive: impl Into<String>) -> Self {
        self.on_directive = directive.into();
        self
    }

    /// Set the "turn off" directive (builder pattern).
    #[must_use]
    pub fn with_off_directive(mut self, directive: impl Into<String>) -> Self {
        self.off_directive = directive.into();
        self
    }

    /// Set the destination specifier (builder pattern).
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Request link removal after firing (builder pattern).
    #[must_use]
    pub fn removing_links(mut self) -> Self {
        self.remove_links = true;
        self
    }

    /// Set the suppression chance in percent (builder pattern).
    #[must_use]
    pub fn with_fail_chance(mut self, chance: i32) -> Self {
        self.fail_chance = chance;
        self
    }

    /// Name a runtime variable that overrides the suppression chance
    /// (builder pattern).
    #[must_use]
    pub fn with_fail_chance_var(mut self, var: impl Into<String>) -> Self {
        self.fail_chance_var = Some(var.into());
        self
    }

    /// Enforce a use limit (builder pattern).
    #[must_use]
    pub fn with_use_limit(mut self, limit: i32) -> Self {
        self.count_limit = limit;
        self.limited = true;
        self
    }

    /// Set the falloff interval in milliseconds (builder pattern).
    #[must_use]
    pub fn with_falloff(mut self, falloff_ms: u64) -> Self {
        self.falloff_ms = falloff_ms;
        self
    }

    /// Set which directions count toward the limit (builder pattern).
    #[must_use]
    pub fn with_count_mode(mut self, mode: CountMode) -> Self {
        self.count_mode = mode;
        self
    }
}
