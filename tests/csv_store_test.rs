use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use movielog::codec::{CSV_HEADER, LEGACY_CSV_HEADER};
use movielog::management::{CsvStore, MovieStore, StoreError};
use movielog::types::Movie;
use movielog::utils;
use tempfile::TempDir;

fn csv_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("movies.csv")
}

async fn open_loaded(path: &Path) -> CsvStore {
    let mut store = CsvStore::open(path).await.unwrap();
    store.load().await.unwrap();
    store
}

fn dune() -> Movie {
    Movie::new("Dune", 2021, "Denis Villeneuve", "Great score", true)
}

fn dated(name: &str, year: i32, day: u32) -> Movie {
    Movie::new(name, year, "", "", false).with_date(NaiveDate::from_ymd_opt(2024, 1, day))
}

#[tokio::test]
async fn test_open_creates_file_with_header() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);

    let store = open_loaded(&path).await;
    assert_eq!(store.count(), 0);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, format!("{}\n", CSV_HEADER));
}

#[tokio::test]
async fn test_open_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.csv");
    let content = format!("{}\nAlien,1979,\"Ridley Scott\",2024-05-06,\"\",1\n", CSV_HEADER);
    std::fs::write(&path, &content).unwrap();

    let store = open_loaded(&path).await;
    assert_eq!(store.count(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[tokio::test]
async fn test_add_dune_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;

    store.add(dune()).await.unwrap();

    let all = store.movies();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Dune");
    assert_eq!(all[0].date_added, Some(utils::today()));
    assert_eq!(store.favorites(), all.to_vec());
    assert_eq!(store.search_by_director("villeneuve"), all.to_vec());
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn test_update_notes_preserves_identity() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dune()).await.unwrap();

    let original = store.movies()[0].clone();
    let mut updated = original.clone();
    updated.notes = "Even better on a second watch".to_string();
    store.update(0, updated).await.unwrap();

    let found = store.search_by_name("Dune");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].notes, "Even better on a second watch");
    assert_eq!(found[0].date_added, original.date_added);

    let reloaded = open_loaded(&path).await;
    assert_eq!(reloaded.movies()[0].notes, "Even better on a second watch");
}

#[tokio::test]
async fn test_replace_addresses_by_identity() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;
    store.add(dated("Alien", 1979, 1)).await.unwrap();
    store.add(dated("Aliens", 1986, 2)).await.unwrap();

    let original = store.movies()[1].clone();
    let mut updated = original.clone();
    updated.is_favorite = true;
    MovieStore::replace(&mut store, &original, updated).await.unwrap();
    assert!(store.movies()[1].is_favorite);
    assert!(!store.movies()[0].is_favorite);

    let missing = dated("Alien 3", 1992, 3);
    let err = store.replace(&missing, missing.clone()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_update_invalid_index() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;
    store.add(dune()).await.unwrap();

    let err = store.update(1, dune()).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidIndex(1)));
    assert!(store.last_error().unwrap().contains("invalid movie index"));
}

#[tokio::test]
async fn test_search_by_name_is_exact() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;
    store.add(dated("inception", 2010, 1)).await.unwrap();
    store.add(dated("Inception 2", 2030, 2)).await.unwrap();

    let found = store.search_by_name("Inception");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "inception");
    assert!(store.search_by_name("Incep").is_empty());
}

#[tokio::test]
async fn test_search_by_date_range_inclusive() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;
    store.add(dated("Alien", 1979, 5)).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(store.search_by_date_range(day, day).len(), 1);
}

#[tokio::test]
async fn test_delete_then_load_does_not_resurrect() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dated("Alien", 1979, 1)).await.unwrap();
    store.add(dated("Aliens", 1986, 2)).await.unwrap();

    let target = store.movies()[0].clone();
    store.delete(&target).await.unwrap();
    store.load().await.unwrap();

    assert_eq!(store.count(), 1);
    assert_eq!(store.movies()[0].name, "Aliens");

    let reopened = open_loaded(&path).await;
    assert_eq!(reopened.count(), 1);
}

#[tokio::test]
async fn test_delete_matches_full_identity() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dated("Alien", 1979, 1)).await.unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let other_day = dated("Alien", 1979, 2);
    let err = store.delete(&other_day).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(store.last_error().unwrap().contains("not found"));
    assert_eq!(store.count(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_delete_removes_first_of_identical_records() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;
    let mut first = dated("Alien", 1979, 1);
    first.notes = "first".to_string();
    let mut second = first.clone();
    second.notes = "second".to_string();
    store.add(first.clone()).await.unwrap();
    store.add(second).await.unwrap();

    store.delete(&first).await.unwrap();
    assert_eq!(store.count(), 1);
    assert_eq!(store.movies()[0].notes, "second");
}

#[tokio::test]
async fn test_load_drops_malformed_and_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(
        &path,
        format!(
            "{}\nAlien,1979,\"Ridley Scott\",2024-05-06,\"\",1\n\n   \nbroken,line\n,1999,\"\",2024-01-01,\"\",0\nHeat,1995,\"Michael Mann\",2024-05-07,\"\",0\n",
            CSV_HEADER
        ),
    )
    .unwrap();

    let store = open_loaded(&path).await;
    let names: Vec<&str> = store.movies().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alien", "Heat"]);
}

#[tokio::test]
async fn test_load_legacy_file_and_save_current_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.csv");
    std::fs::write(
        &path,
        format!(
            "{}\nHeat,1995,2024-01-02,\"Classic\",1\n",
            LEGACY_CSV_HEADER
        ),
    )
    .unwrap();

    let mut store = open_loaded(&path).await;
    assert_eq!(store.count(), 1);
    assert_eq!(store.movies()[0].director, "");
    assert!(store.movies()[0].is_favorite);

    store.save().await.unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        format!("{}\nHeat,1995,\"\",2024-01-02,\"Classic\",1\n", CSV_HEADER)
    );
}

#[tokio::test]
async fn test_save_keeps_collection_order() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dated("Zodiac", 2007, 3)).await.unwrap();
    store.add(dated("Alien", 1979, 1)).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Zodiac,"));
    assert!(lines[2].starts_with("Alien,"));
}

#[tokio::test]
async fn test_failed_load_keeps_previous_state() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dune()).await.unwrap();

    std::fs::remove_file(&path).unwrap();
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::IoError(_)));
    assert!(store.last_error().is_some());
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn test_failed_writes_roll_back() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dated("Alien", 1979, 1)).await.unwrap();

    // a directory in place of the file makes every write fail
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let err = store.add(dune()).await.unwrap_err();
    assert!(matches!(err, StoreError::IoError(_)));
    assert_eq!(store.count(), 1);

    let mut changed = store.movies()[0].clone();
    changed.notes = "changed".to_string();
    assert!(store.update(0, changed).await.is_err());
    assert_eq!(store.movies()[0].notes, "");

    let target = store.movies()[0].clone();
    assert!(store.delete(&target).await.is_err());
    assert_eq!(store.count(), 1);
    assert!(store.last_error().unwrap().contains("file error"));
}

#[tokio::test]
async fn test_success_clears_last_error() {
    let dir = TempDir::new().unwrap();
    let mut store = open_loaded(&csv_path(&dir)).await;

    assert!(store.delete(&dune()).await.is_err());
    assert!(store.last_error().is_some());

    store.add(dune()).await.unwrap();
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn test_name_with_leading_quote_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store
        .add(Movie::new("\"Heat", 1995, "Michael Mann", "x", false))
        .await
        .unwrap();

    let reopened = open_loaded(&path).await;
    assert_eq!(reopened.count(), 1);
    assert_eq!(reopened.movies()[0].name, "\"Heat");
    assert_eq!(reopened.movies()[0].director, "Michael Mann");
}

#[tokio::test]
async fn test_delete_not_found_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = csv_path(&dir);
    let mut store = open_loaded(&path).await;
    store.add(dated("Alien", 1979, 1)).await.unwrap();
    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

    let err = store.delete(&dated("Heat", 1995, 1)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);

    // any write would now fail, so a miss must still report NotFound
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();
    let err = store.delete(&dated("Heat", 1995, 1)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.count(), 1);
}
