use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    management::{CsvStore, MovieStore},
    query, success, warning,
};

use super::open_remote_store;

/// Pushes every readable record of a CSV file to the REST backend.
///
/// Records keep their original date. A record whose name and year already
/// exist on the backend is skipped. A record the backend refuses is skipped
/// with a warning and the import carries on with the next one.
pub async fn import(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(config::csv_path);
    if !path.is_file() {
        error!("CSV file not found at {}", path.display());
    }

    let mut source = match CsvStore::open(&path).await {
        Ok(store) => store,
        Err(e) => error!("Cannot open {}. Err: {}", path.display(), e),
    };
    if let Err(e) = source.load().await {
        error!("Cannot read {}. Err: {}", path.display(), e);
    }

    let mut remote = open_remote_store().await;

    let pb = ProgressBar::new(source.count() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let mut imported = 0;
    let mut skipped = 0;
    for movie in source.movies() {
        pb.set_message(movie.name.clone());
        if query::has_duplicate(remote.movies(), &movie.name, movie.year) {
            skipped += 1;
        } else if let Err(e) = remote.add(movie.clone()).await {
            pb.suspend(|| warning!("Skipping '{}' ({}). Err: {}", movie.name, movie.year, e));
            skipped += 1;
        } else {
            imported += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    success!(
        "Imported {} movies from {} ({} skipped).",
        imported,
        path.display(),
        skipped
    );
}
