//! Directive classification.
//!
//! A directive is the configured text a trigger emits in one direction.
//! Most directives are plain notifications forwarded verbatim, but a
//! directive of the form `[intensity]archetype-name` encodes a simulated
//! stimulus instead: the bracketed number is the intensity, the trailing
//! name must resolve to a stimulus archetype.
//!
//! Classification happens exactly once, when the engine is constructed,
//! and is immutable afterwards. Anything that fails to parse as a stimulus
//! degrades to notification behavior with the original text kept verbatim.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, ObjectId};
use crate::ports::NameResolver;

/// What a directive does when dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DirectiveKind {
    /// Forward the directive text verbatim.
    Notification,
    /// Apply a simulated stimulus.
    Stimulus {
        /// Stimulus archetype. Always negative.
        archetype: ObjectId,
        /// Stimulus intensity.
        intensity: f32,
    },
}

/// A classified directive: the raw text plus what dispatching it does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    text: String,
    kind: DirectiveKind,
}

impl Directive {
    /// Classify a directive string.
    ///
    /// A directive is a stimulus iff it starts with `[`, immediately
    /// followed by a parseable floating-point literal, followed eventually
    /// by a `]`, followed by at least one more character naming an object
    /// that resolves to an archetype. Everything else is a notification.
    pub fn classify(text: impl Into<String>, names: &dyn NameResolver) -> Self {
        let text = text.into();
        let kind = classify_kind(&text, names);
        Self { text, kind }
    }

    /// The raw directive text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The classification.
    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    /// Check if this directive dispatches a stimulus.
    #[must_use]
    pub fn is_stimulus(&self) -> bool {
        matches!(self.kind, DirectiveKind::Stimulus { .. })
    }
}

/// The off/on directive pair of one trigger, indexed by [`Direction`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectivePair {
    off: Directive,
    on: Directive,
}

impl DirectivePair {
    /// Bundle an off/on pair.
    pub fn new(off: Directive, on: Directive) -> Self {
        Self { off, on }
    }

    /// The directive for `direction`.
    #[must_use]
    pub fn get(&self, direction: Direction) -> &Directive {
        match direction {
            Direction::Off => &self.off,
            Direction::On => &self.on,
        }
    }
}

impl std::ops::Index<Direction> for DirectivePair {
    type Output = Directive;

    fn index(&self, direction: Direction) -> &Directive {
        self.get(direction)
    }
}

fn classify_kind(text: &str, names: &dyn NameResolver) -> DirectiveKind {
    // Not bracketed, not a stimulus
    let Some(body) = text.strip_prefix('[') else {
        return DirectiveKind::Notification;
    };

    let Some((intensity, consumed)) = float_prefix(body) else {
        return DirectiveKind::Notification;
    };

    // Scan forward to the closing bracket; characters between the number
    // and the bracket are ignored
    let rest = &body[consumed..];
    let Some(close) = rest.find(']') else {
        return DirectiveKind::Notification;
    };

    let name = &rest[close + 1..];
    if name.is_empty() {
        return DirectiveKind::Notification;
    }

    match names.object_named(name) {
        Some(archetype) if archetype.is_archetype() => DirectiveKind::Stimulus {
            archetype,
            intensity,
        },
        _ => DirectiveKind::Notification,
    }
}

/// Parse the longest floating-point literal prefix of `s`.
///
/// Returns the value and the number of bytes consumed, or `None` when no
/// digit was consumed. Accepts an optional sign, fraction, and exponent;
/// the exponent is only consumed when well formed.
fn float_prefix(s: &str) -> Option<(f32, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let mut digits = 0;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
        digits += 1;
    }

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    let mut end = i;
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let mut exp_digits = 0;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
            exp_digits += 1;
        }
        if exp_digits > 0 {
            end = j;
        }
    }

    s[..end].parse::<f32>().ok().map(|value| (value, end))
}
