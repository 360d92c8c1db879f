//! Cast and reviews: payloads for the two sub-views nested under a movie.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Raw `movie/{id}/credits` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCredits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<RawCastMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCastMember {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Raw `movie/{id}/reviews` response (first page only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReviews {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawReview>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub photo: Option<String>,
}

impl CastMember {
    pub fn from_raw(raw: RawCastMember) -> Self {
        Self {
            name: raw.name,
            character: raw.character,
            photo: raw.profile_path.filter(|p| !p.is_empty()),
        }
    }

    /// Map a whole credits payload, keeping billing order.
    pub fn list_from_raw(raw: RawCredits) -> Vec<Self> {
        raw.cast.into_iter().map(Self::from_raw).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub author: String,
    pub content: String,
}

impl Review {
    pub fn from_raw(raw: RawReview) -> Self {
        Self {
            author: raw.author,
            content: raw.content.trim().to_string(),
        }
    }

    pub fn list_from_raw(raw: RawReviews) -> Vec<Self> {
        raw.results.into_iter().map(Self::from_raw).collect()
    }
}
