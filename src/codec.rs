//! Line codec for the CSV movie file.
//!
//! One record maps to one line. Free-text fields (`director`, `notes`) are
//! wrapped in double quotes with embedded quotes doubled; every other field is
//! written bare and must not contain a comma.
//!
//! Two layouts are readable:
//!
//! ```text
//! Movie Name,Year,Date Added,Notes,Is Favorite           (legacy, 5 columns)
//! Movie Name,Year,Director,Date Added,Notes,Is Favorite  (current, 6 columns)
//! ```
//!
//! Only the current layout is ever written.

use chrono::NaiveDate;

use crate::types::Movie;

pub const CSV_HEADER: &str = "Movie Name,Year,Director,Date Added,Notes,Is Favorite";
pub const LEGACY_CSV_HEADER: &str = "Movie Name,Year,Date Added,Notes,Is Favorite";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CURRENT_COLUMNS: usize = 6;
const LEGACY_COLUMNS: usize = 5;

pub fn encode(movie: &Movie) -> String {
    format!(
        "{name},{year},{director},{date},{notes},{favorite}",
        name = movie.name,
        year = movie.year,
        director = quote(&movie.director),
        date = format_date(movie.date_added),
        notes = quote(&movie.notes),
        favorite = if movie.is_favorite { "1" } else { "0" },
    )
}

/// Decodes one data line.
///
/// Never fails: a line with fewer than five parts yields `Movie::default()`,
/// and individual fields that do not parse fall back to their zero value
/// (year `0`, no date).
pub fn decode(line: &str) -> Movie {
    let parts = split_line(line);
    if parts.len() < LEGACY_COLUMNS {
        return Movie::default();
    }

    let (director, date, notes, favorite) = if parts.len() >= CURRENT_COLUMNS {
        (unquote(parts[2]), parts[3], parts[4], parts[5])
    } else {
        (String::new(), parts[2], parts[3], parts[4])
    };

    Movie {
        name: parts[0].trim().to_string(),
        year: parts[1].trim().parse().unwrap_or(0),
        director,
        date_added: parse_date(date),
        notes: unquote(notes),
        is_favorite: favorite.trim() == "1",
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn quote(value: &str) -> String {
    // one record per line, so line breaks in free text are flattened
    let flat = value.replace(['\r', '\n'], " ");
    format!("\"{}\"", flat.replace('"', "\"\""))
}

fn unquote(raw: &str) -> String {
    let value = raw.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].replace("\"\"", "\"")
    } else {
        value.to_string()
    }
}

/// Splits on commas that sit outside a quoted field. A field is quoted only
/// when it opens with `"`; inside it `""` is an escaped quote. The name column
/// is never quoted, so a leading `"` there is plain text. A quote left open at
/// the end of the line falls back to a bare comma split. Quotes are kept in
/// the returned parts so that `unquote` decides what to strip.
fn split_line(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some((_, '"'))) {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if !parts.is_empty() && line[start..i].trim().is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                parts.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_quotes {
        return line.split(',').collect();
    }
    parts.push(&line[start..]);
    parts
}
