//! Object identification.
//!
//! Every simulation object a trigger can touch is named by an `ObjectId`.
//! The sign of the raw value carries meaning, following the host convention:
//!
//! - Negative IDs are **archetypes**: abstract templates such as stimulus
//!   kinds, never placed in the world.
//! - Non-negative IDs are **live instances**: concrete objects that can
//!   receive notifications or be stimulated.
//!
//! ## Usage
//!
//! ```
//! use sim_trigger::core::ObjectId;
//!
//! let fire_stim = ObjectId::new(-42);
//! let door = ObjectId::new(17);
//!
//! assert!(fire_stim.is_archetype());
//! assert!(door.is_instance());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any simulation object.
///
/// Negative values refer to archetypes, non-negative values to live
/// instances. Use `is_archetype()` / `is_instance()` to distinguish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub i32);

impl ObjectId {
    /// Create an object ID from a raw value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check if this ID refers to an archetype (negative ID).
    #[must_use]
    pub const fn is_archetype(self) -> bool {
        self.0 < 0
    }

    /// Check if this ID refers to a live instance (non-negative ID).
    #[must_use]
    pub const fn is_instance(self) -> bool {
        self.0 >= 0
    }
}

impl From<i32> for ObjectId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}
