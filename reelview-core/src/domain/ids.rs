//! Movie identifier newtype.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a movie as it appears in a route path segment.
///
/// Opaque to this crate: TMDB uses numeric ids but nothing here relies on that.
/// Only unreserved URL characters (`A-Z a-z 0-9 - . _ ~`) are accepted, so an id
/// can be placed in a request path without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MovieId(String);

impl MovieId {
    /// Parse a route segment into an identifier.
    ///
    /// Surrounding whitespace is trimmed. Returns `None` for empty input, the
    /// `.`/`..` segments, and anything with a character outside the unreserved set.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
            return None;
        }
        if !trimmed.chars().all(is_unreserved) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

impl TryFrom<String> for MovieId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("invalid movie id {raw:?}"))
    }
}

impl From<MovieId> for String {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
