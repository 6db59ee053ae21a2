use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};

use crate::{
    codec,
    types::{Movie, MovieTableRow},
};

pub const MIN_YEAR: i32 = 1900;

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), codec::DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}', expected YYYY-MM-DD: {}", value.trim(), e))
}

/// Accepts years from 1900 up to five years past the current one.
pub fn validate_year(year: i32) -> Result<i32, String> {
    let max = today().year() + 5;
    if (MIN_YEAR..=max).contains(&year) {
        Ok(year)
    } else {
        Err(format!("year {} is outside {}..={}", year, MIN_YEAR, max))
    }
}

/// Trims `name` and rejects values the CSV file cannot hold: names are written
/// without quotes, so they must be non-empty and free of commas.
pub fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("movie name cannot be empty".to_string());
    }
    if name.contains(',') || name.contains('\n') {
        return Err(format!("movie name '{}' cannot contain commas or line breaks", name));
    }
    Ok(name.to_string())
}

/// Table column a listing can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Year,
    Director,
    Date,
    Favorite,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::Year,
        SortKey::Director,
        SortKey::Date,
        SortKey::Favorite,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Year => "year",
            SortKey::Director => "director",
            SortKey::Date => "date",
            SortKey::Favorite => "favorite",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "name" => Ok(SortKey::Name),
            "year" => Ok(SortKey::Year),
            "director" => Ok(SortKey::Director),
            "date" | "date_added" => Ok(SortKey::Date),
            "favorite" | "is_favorite" => Ok(SortKey::Favorite),
            other => Err(format!(
                "invalid value '{}', expected one of: {}",
                other,
                SortKey::ALL
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// clap value parser for `--sort`.
pub fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    if s.trim().is_empty() {
        return Err("sort key cannot be empty".to_string());
    }
    s.parse()
}

/// Stable sort; ties keep their current relative order.
pub fn sort_movies(movies: &mut [Movie], key: SortKey, descending: bool) {
    movies.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::Director => a.director.to_lowercase().cmp(&b.director.to_lowercase()),
            SortKey::Date => a.date_added.cmp(&b.date_added),
            SortKey::Favorite => a.is_favorite.cmp(&b.is_favorite),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Orders the way the backend lists records: newest date first, with the most
/// recently inserted record first among equal dates.
pub fn sort_newest_first(movies: &mut Vec<Movie>) {
    movies.reverse();
    movies.sort_by(|a, b| b.date_added.cmp(&a.date_added));
}

pub fn movie_table_rows(movies: &[Movie]) -> Vec<MovieTableRow> {
    movies
        .iter()
        .map(|m| MovieTableRow {
            name: m.name.clone(),
            year: m.year,
            director: m.director.clone(),
            date_added: codec::format_date(m.date_added),
            notes: m.notes.clone(),
            favorite: if m.is_favorite { "★" } else { "" }.to_string(),
        })
        .collect()
}
