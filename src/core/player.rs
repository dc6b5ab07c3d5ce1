//! Player identification.
//!
//! The engine refers to players by a single canonical identifier: a named
//! [`PlayerId`]. Any richer player abstraction (human front end, agent)
//! converts to its identifier before calling into the core.

use serde::{Deserialize, Serialize};

/// Canonical player identifier: the player's name.
///
/// Two identifiers are equal iff their names are equal. The board validates
/// names at construction (two distinct, non-empty names); everywhere else a
/// `PlayerId` is checked against the registered pair.
///
/// ```
/// use morris_engine::core::PlayerId;
///
/// let alice = PlayerId::new("alice");
/// assert_eq!(alice.name(), "alice");
/// assert_eq!(format!("{}", alice), "alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player identifier from a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty (rejected at board construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PlayerId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
