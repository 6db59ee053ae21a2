use chrono::NaiveDate;

use crate::{error, management::MovieStore, query, success, types::Movie};

use super::find_target;

#[derive(Debug, Clone)]
pub struct AddArgs {
    pub name: String,
    pub year: i32,
    pub director: String,
    pub notes: String,
    pub favorite: bool,
}

/// Fields left as `None` keep the value of the existing record.
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    pub new_name: Option<String>,
    pub new_year: Option<i32>,
    pub director: Option<String>,
    pub notes: Option<String>,
    pub favorite: Option<bool>,
}

/// Adds a movie dated today. With `reject_duplicates` a movie sharing the
/// name (ignoring case) and year of an existing one is refused before the
/// store is touched.
pub async fn add<S: MovieStore>(store: &mut S, args: AddArgs, reject_duplicates: bool) {
    if reject_duplicates && query::has_duplicate(store.movies(), &args.name, args.year) {
        error!(
            "A movie named '{}' from {} already exists.",
            args.name, args.year
        );
    }

    let movie = Movie::new(
        args.name,
        args.year,
        args.director.trim(),
        args.notes.trim(),
        args.favorite,
    );
    let name = movie.name.clone();

    match store.add(movie).await {
        Ok(()) => success!("Added '{}'.", name),
        Err(e) => error!("Cannot add '{}'. Err: {}", name, e),
    }
}

/// Replaces the whole record, carrying over its original date.
pub async fn update<S: MovieStore>(
    store: &mut S,
    name: &str,
    year: i32,
    date: Option<NaiveDate>,
    args: UpdateArgs,
) {
    let original = match find_target(store, name, year, date) {
        Ok(movie) => movie,
        Err(e) => error!("{}", e),
    };

    let updated = apply_update(&original, args);
    let updated_name = updated.name.clone();
    match store.replace(&original, updated).await {
        Ok(()) => success!("Updated '{}'.", updated_name),
        Err(e) => error!("Cannot update '{}'. Err: {}", original.name, e),
    }
}

pub async fn delete<S: MovieStore>(
    store: &mut S,
    name: &str,
    year: i32,
    date: Option<NaiveDate>,
) {
    let target = match find_target(store, name, year, date) {
        Ok(movie) => movie,
        Err(e) => error!("{}", e),
    };

    match store.delete(&target).await {
        Ok(()) => success!("Deleted '{}' ({}).", target.name, target.year),
        Err(e) => error!("Cannot delete '{}'. Err: {}", target.name, e),
    }
}

pub fn apply_update(original: &Movie, args: UpdateArgs) -> Movie {
    Movie {
        name: args.new_name.unwrap_or_else(|| original.name.clone()),
        year: args.new_year.unwrap_or(original.year),
        director: args
            .director
            .map(|d| d.trim().to_string())
            .unwrap_or_else(|| original.director.clone()),
        date_added: original.date_added,
        notes: args
            .notes
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| original.notes.clone()),
        is_favorite: args.favorite.unwrap_or(original.is_favorite),
    }
}
