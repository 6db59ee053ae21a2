use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// A single movie review entry.
///
/// `Movie::default()` (empty name, year 0, no date) doubles as the sentinel the
/// CSV codec returns for lines it cannot make sense of; callers detect it by
/// checking for an empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub director: String,
    pub date_added: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Movie {
    /// Creates a record dated today.
    pub fn new(
        name: impl Into<String>,
        year: i32,
        director: impl Into<String>,
        notes: impl Into<String>,
        is_favorite: bool,
    ) -> Self {
        Self {
            name: name.into(),
            year,
            director: director.into(),
            date_added: Some(utils::today()),
            notes: notes.into(),
            is_favorite,
        }
    }

    pub fn with_date(mut self, date_added: Option<NaiveDate>) -> Self {
        self.date_added = date_added;
        self
    }

    pub fn key(&self) -> MovieKey {
        MovieKey {
            name: self.name.clone(),
            year: self.year,
            date_added: self.date_added,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

/// The identity triple used to address a record for update and delete.
///
/// Two records that agree on all three fields cannot be told apart; the
/// stores always act on the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieKey {
    pub name: String,
    pub year: i32,
    pub date_added: Option<NaiveDate>,
}

impl MovieKey {
    pub fn matches(&self, movie: &Movie) -> bool {
        self.name == movie.name && self.year == movie.year && self.date_added == movie.date_added
    }
}

/// Body of `POST /movies`. The backend dates the record today when
/// `date_added` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMovieRequest {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub date_added: Option<NaiveDate>,
}

impl From<&Movie> for CreateMovieRequest {
    fn from(movie: &Movie) -> Self {
        Self {
            name: movie.name.clone(),
            year: movie.year,
            director: movie.director.clone(),
            notes: movie.notes.clone(),
            is_favorite: movie.is_favorite,
            date_added: movie.date_added,
        }
    }
}

/// Body of `PUT /movies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMovieRequest {
    pub original: MovieKey,
    pub updated: Movie,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMovieResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Tabled)]
pub struct MovieTableRow {
    #[tabled(rename = "Movie Name")]
    pub name: String,
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "Director")]
    pub director: String,
    #[tabled(rename = "Date Added")]
    pub date_added: String,
    #[tabled(rename = "Notes")]
    pub notes: String,
    #[tabled(rename = "Favorite")]
    pub favorite: String,
}
