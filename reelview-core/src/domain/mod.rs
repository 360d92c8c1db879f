//! Domain types: identifiers, raw API payloads and their display models.

pub mod credits;
pub mod ids;
pub mod movie;

pub use credits::{CastMember, RawCastMember, RawCredits, RawReview, RawReviews, Review};
pub use ids::MovieId;
pub use movie::{MovieDetails, RawGenre, RawMovieDetails};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
