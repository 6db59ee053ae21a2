use chrono::NaiveDate;
use tabled::Table;

use crate::{
    info,
    management::MovieStore,
    query,
    types::Movie,
    utils::{self, SortKey},
};

/// Filters and ordering for [`list`]. Every filter is optional.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub name: Option<String>,
    pub director: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub favorites: bool,
    pub sort: Option<SortKey>,
    pub descending: bool,
}

pub fn list<S: MovieStore>(store: &S, args: &ListArgs) {
    let movies = filter_movies(store, args);
    if movies.is_empty() {
        info!("No movies found ({} stored).", store.count());
        return;
    }

    let table = Table::new(utils::movie_table_rows(&movies));
    println!("{}", table);
    info!("Showing {} of {} movies.", movies.len(), store.count());
}

/// Applies the filters in the order name, director, date range, favorites,
/// then sorts if asked to. Without a sort key the store order is kept.
pub fn filter_movies<S: MovieStore>(store: &S, args: &ListArgs) -> Vec<Movie> {
    let mut movies = match &args.name {
        Some(name) if !name.trim().is_empty() => store.search_by_name(name.trim()),
        _ => store.movies().to_vec(),
    };

    if let Some(director) = args.director.as_deref().filter(|d| !d.trim().is_empty()) {
        movies = query::search_by_director(&movies, director.trim());
    }

    if args.from.is_some() || args.to.is_some() {
        let start = args.from.unwrap_or(NaiveDate::MIN);
        let end = args.to.unwrap_or(NaiveDate::MAX);
        movies = query::search_by_date_range(&movies, start, end);
    }

    if args.favorites {
        movies = query::favorites(&movies);
    }

    if let Some(key) = args.sort {
        utils::sort_movies(&mut movies, key, args.descending);
    }
    movies
}
