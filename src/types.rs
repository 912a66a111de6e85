//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialized board layout, the canonical key into the position graph.
///
/// Two move orders that reach the same arrangement of marks produce the same
/// `LayoutKey`, which is what makes transposition sharing work: the graph
/// stores one node per key, and every parent links to it by this key.
///
/// The side to move is not part of the key. Piece counts determine whose
/// turn it is, so layout identity alone is sufficient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayoutKey(String);

impl LayoutKey {
    /// Wrap an already-serialized layout string.
    pub fn new(encoded: impl Into<String>) -> Self {
        LayoutKey(encoded.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for LayoutKey {
    fn from(s: &str) -> Self {
        LayoutKey(s.to_string())
    }
}

impl fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
