//! # CLI Module
//!
//! User-facing commands of movielog. The CLI stands where a GUI would: it
//! owns one store, calls into it, and renders what comes back.
//!
//! ## Commands
//!
//! - [`list`] - table of movies with name/director/date/favorite filters and sorting
//! - [`add`] - add a movie dated today
//! - [`update`] - replace a movie, keeping its date
//! - [`delete`] - remove a movie
//! - [`import`] - push the records of a CSV file to the REST backend
//! - [`serve`] - run the REST backend over the configured CSV file
//!
//! ## Stores
//!
//! [`open_csv_store`] and [`open_remote_store`] build and load the store the
//! other commands run against. The commands are generic over
//! [`crate::management::MovieStore`], so they behave the same on either
//! variant apart from the name matching rule of `list --name`.
//!
//! ## Errors
//!
//! Commands print their outcome with the crate's output macros. A failure that
//! leaves nothing to do ends the process through `error!`.

mod edit;
mod import;
mod list;
mod serve;

use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

pub use edit::{AddArgs, UpdateArgs, add, apply_update, delete, update};
pub use import::import;
pub use list::{ListArgs, filter_movies, list};
pub use serve::serve;

use crate::{
    config, error,
    management::{CsvStore, MovieStore, RemoteStore},
    types::Movie,
};

/// Opens and loads the CSV file from `MOVIELOG_CSV_PATH`.
pub async fn open_csv_store() -> CsvStore {
    let path = config::csv_path();
    let mut store = match CsvStore::open(&path).await {
        Ok(store) => store,
        Err(e) => error!("Cannot open {}. Err: {}", path.display(), e),
    };

    if let Err(e) = store.load().await {
        error!("Cannot load movies from {}. Err: {}", path.display(), e);
    }
    store
}

/// Probes the backend once, then loads the full collection from it.
pub async fn open_remote_store() -> RemoteStore {
    let url = config::api_url();
    let timeout = config::request_timeout();
    let mut store = match RemoteStore::new(&url, timeout) {
        Ok(store) => store,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };

    let pb = spinner(format!("Waiting for backend at {}...", url));
    let ready = store.wait_until_ready(timeout).await;
    pb.finish_and_clear();
    if !ready {
        error!(
            "Backend not reachable at {}. Err: {}",
            url,
            store.last_error().unwrap_or("unknown error")
        );
    }

    if let Err(e) = store.load().await {
        error!("Cannot load movies from {}. Err: {}", url, e);
    }
    store
}

/// Finds the record a command refers to by name and year, narrowed by date
/// when one is given. Without a date the name and year must be unambiguous.
pub fn find_target<S: MovieStore>(
    store: &S,
    name: &str,
    year: i32,
    date: Option<NaiveDate>,
) -> Result<Movie, String> {
    let candidates: Vec<&Movie> = store
        .movies()
        .iter()
        .filter(|m| m.name == name && m.year == year)
        .filter(|m| date.is_none() || m.date_added == date)
        .collect();

    match candidates.as_slice() {
        [] => Err(format!("No movie '{}' ({}) found", name, year)),
        [movie] => Ok((*movie).clone()),
        [first, ..] if date.is_some() => Ok((*first).clone()),
        _ => Err(format!(
            "{} movies named '{}' ({}); pass --date to pick one",
            candidates.len(),
            name,
            year
        )),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
