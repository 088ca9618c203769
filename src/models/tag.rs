//! Player tag normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player tag in normalized form: no leading `#`, trimmed, uppercase.
///
/// Upstream records carry tags as `#ABC123`; lookups may arrive with or
/// without the prefix. Both normalize to the same value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PlayerTag(String);

impl PlayerTag {
    /// Normalize a raw tag.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix('#').unwrap_or(trimmed);
        Self(bare.trim().to_ascii_uppercase())
    }

    /// Tag without the `#` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical display form with the `#` prefix.
    pub fn canonical(&self) -> String {
        format!("#{}", self.0)
    }

    /// Form safe to place in a URL path segment (`%23ABC123`).
    pub fn url_encoded(&self) -> String {
        format!("%23{}", self.0)
    }

    /// Whether a raw tag refers to this player.
    pub fn matches(&self, raw: &str) -> bool {
        *self == PlayerTag::new(raw)
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Debug for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerTag({})", self.0)
    }
}

impl From<String> for PlayerTag {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for PlayerTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PlayerTag> for String {
    fn from(tag: PlayerTag) -> Self {
        tag.canonical()
    }
}
