//! Read-only filters over a slice of records.
//!
//! Every function is a stable filter: matches come back in their original
//! relative order, nothing is sorted.

use chrono::NaiveDate;

use crate::types::Movie;

/// How `search_by_name` compares names. Both modes ignore case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameMatch {
    /// Whole-name equality. Used by the file-backed store.
    Exact,
    /// Substring containment. Used by the remote-backed store.
    Contains,
}

pub fn search_by_name(movies: &[Movie], name: &str, mode: NameMatch) -> Vec<Movie> {
    let needle = name.to_lowercase();
    movies
        .iter()
        .filter(|m| {
            let candidate = m.name.to_lowercase();
            match mode {
                NameMatch::Exact => candidate == needle,
                NameMatch::Contains => candidate.contains(&needle),
            }
        })
        .cloned()
        .collect()
}

pub fn search_by_director(movies: &[Movie], director: &str) -> Vec<Movie> {
    let needle = director.to_lowercase();
    movies
        .iter()
        .filter(|m| m.director.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Inclusive on both ends. Records without a date never match.
pub fn search_by_date_range(movies: &[Movie], start: NaiveDate, end: NaiveDate) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| matches!(m.date_added, Some(d) if d >= start && d <= end))
        .cloned()
        .collect()
}

pub fn favorites(movies: &[Movie]) -> Vec<Movie> {
    movies.iter().filter(|m| m.is_favorite).cloned().collect()
}

/// True when a record with the same name (ignoring case and surrounding
/// whitespace) and the same year already exists.
pub fn has_duplicate(movies: &[Movie], name: &str, year: i32) -> bool {
    let needle = name.trim().to_lowercase();
    movies
        .iter()
        .any(|m| m.year == year && m.name.trim().to_lowercase() == needle)
}
