//! Movie details: the raw `movie/{id}` payload and the display model derived from it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Raw `movie/{id}` response. Only the fields the detail view reads are kept;
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMovieDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    /// ISO `YYYY-MM-DD`; TMDB sends `""` for unreleased titles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<RawGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// 0.0 ..= 10.0
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGenre {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// UI-ready snapshot of one movie. Built fresh on every successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDetails {
    pub title: String,
    /// `None` when the release date is empty or unparsable.
    pub release_year: Option<i32>,
    /// Possibly empty.
    pub overview: String,
    /// Genre names joined with a single space, in payload order. Possibly empty.
    pub genres: String,
    /// Poster path relative to the image host, verbatim.
    pub poster: Option<String>,
    /// Integer percentage, no decimals ("78" for 7.83).
    pub vote_average: String,
}

impl MovieDetails {
    /// Map the raw payload into the display model. Pure and deterministic.
    pub fn from_raw(raw: RawMovieDetails) -> Self {
        Self {
            release_year: release_year(&raw.release_date),
            genres: raw
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            vote_average: score_percent(raw.vote_average).to_string(),
            title: raw.original_title,
            overview: raw.overview,
            poster: raw.poster_path,
        }
    }

    /// "Title (Year)", or just the title when the year is unknown.
    pub fn heading(&self) -> String {
        match self.release_year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }

    /// Poster path if one is usable. Empty strings count as absent.
    pub fn poster_path(&self) -> Option<&str> {
        self.poster.as_deref().filter(|p| !p.is_empty())
    }
}

/// Year of a `YYYY-MM-DD` date string.
pub fn release_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// `vote_average * 10`, rounded half away from zero. Non-finite input scores 0.
pub fn score_percent(vote_average: f64) -> i64 {
    let scaled = (vote_average * 10.0).round();
    if scaled.is_finite() {
        scaled as i64
    } else {
        0
    }
}
