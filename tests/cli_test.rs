use chrono::NaiveDate;
use movielog::cli::{self, AddArgs, ListArgs, UpdateArgs};
use movielog::management::{CsvStore, MovieStore};
use movielog::types::Movie;
use movielog::utils::SortKey;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_movie(name: &str, year: i32, director: &str, added: NaiveDate, favorite: bool) -> Movie {
    Movie::new(name, year, director, "", favorite).with_date(Some(added))
}

async fn seeded_store(dir: &TempDir) -> CsvStore {
    let mut store = CsvStore::open(dir.path().join("movies.csv")).await.unwrap();
    store.load().await.unwrap();
    for movie in [
        create_test_movie("Tenet", 2020, "Christopher Nolan", date(2024, 3, 1), true),
        create_test_movie("Alien", 1979, "Ridley Scott", date(2024, 1, 1), true),
        create_test_movie("Inception", 2010, "Christopher Nolan", date(2024, 2, 1), false),
        create_test_movie("Heat", 1995, "Michael Mann", date(2024, 4, 1), false),
    ] {
        store.add(movie).await.unwrap();
    }
    store
}

fn names(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.name.as_str()).collect()
}

#[tokio::test]
async fn test_filter_movies_without_filters_keeps_store_order() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let movies = cli::filter_movies(&store, &ListArgs::default());
    assert_eq!(names(&movies), vec!["Tenet", "Alien", "Inception", "Heat"]);
}

#[tokio::test]
async fn test_filter_movies_combines_filters() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let args = ListArgs {
        director: Some("nolan".to_string()),
        from: Some(date(2024, 2, 1)),
        favorites: true,
        ..Default::default()
    };
    assert_eq!(names(&cli::filter_movies(&store, &args)), vec!["Tenet"]);

    let args = ListArgs {
        to: Some(date(2024, 2, 1)),
        ..Default::default()
    };
    assert_eq!(
        names(&cli::filter_movies(&store, &args)),
        vec!["Alien", "Inception"]
    );
}

#[tokio::test]
async fn test_filter_movies_name_and_sort() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let args = ListArgs {
        name: Some(" alien ".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&cli::filter_movies(&store, &args)), vec!["Alien"]);

    let args = ListArgs {
        sort: Some(SortKey::Year),
        descending: true,
        ..Default::default()
    };
    assert_eq!(
        names(&cli::filter_movies(&store, &args)),
        vec!["Tenet", "Inception", "Heat", "Alien"]
    );
}

#[test]
fn test_apply_update_keeps_unset_fields_and_date() {
    let original = Movie {
        name: "Heat".to_string(),
        year: 1995,
        director: "Michael Mann".to_string(),
        date_added: Some(date(2024, 1, 2)),
        notes: "classic".to_string(),
        is_favorite: false,
    };

    let updated = cli::apply_update(
        &original,
        UpdateArgs {
            notes: Some("  rewatched  ".to_string()),
            favorite: Some(true),
            ..Default::default()
        },
    );
    assert_eq!(updated.name, "Heat");
    assert_eq!(updated.year, 1995);
    assert_eq!(updated.director, "Michael Mann");
    assert_eq!(updated.notes, "rewatched");
    assert!(updated.is_favorite);
    assert_eq!(updated.date_added, original.date_added);

    let renamed = cli::apply_update(
        &original,
        UpdateArgs {
            new_name: Some("Heat (Director's Cut)".to_string()),
            new_year: Some(1996),
            ..Default::default()
        },
    );
    assert_eq!(renamed.name, "Heat (Director's Cut)");
    assert_eq!(renamed.year, 1996);
    assert_eq!(renamed.notes, "classic");
}

#[tokio::test]
async fn test_find_target() {
    let dir = TempDir::new().unwrap();
    let mut store = seeded_store(&dir).await;
    store
        .add(create_test_movie("Heat", 1995, "", date(2024, 5, 1), false))
        .await
        .unwrap();

    let found = cli::find_target(&store, "Alien", 1979, None).unwrap();
    assert_eq!(found.date_added, Some(date(2024, 1, 1)));

    let err = cli::find_target(&store, "Alien", 1986, None).unwrap_err();
    assert_eq!(err, "No movie 'Alien' (1986) found");

    let err = cli::find_target(&store, "Heat", 1995, None).unwrap_err();
    assert!(err.contains("pass --date to pick one"));

    let found = cli::find_target(&store, "Heat", 1995, Some(date(2024, 5, 1))).unwrap();
    assert_eq!(found.director, "");
}

#[tokio::test]
async fn test_add_update_delete_commands() {
    let dir = TempDir::new().unwrap();
    let mut store = seeded_store(&dir).await;

    cli::add(
        &mut store,
        AddArgs {
            name: "Dune".to_string(),
            year: 2021,
            director: " Denis Villeneuve ".to_string(),
            notes: String::new(),
            favorite: true,
        },
        true,
    )
    .await;
    let dune = cli::find_target(&store, "Dune", 2021, None).unwrap();
    assert_eq!(dune.director, "Denis Villeneuve");

    cli::update(
        &mut store,
        "Dune",
        2021,
        None,
        UpdateArgs {
            notes: Some("Great score".to_string()),
            ..Default::default()
        },
    )
    .await;
    let updated = cli::find_target(&store, "Dune", 2021, None).unwrap();
    assert_eq!(updated.notes, "Great score");
    assert_eq!(updated.date_added, dune.date_added);

    cli::delete(&mut store, "Dune", 2021, None).await;
    assert!(store.search_by_name("Dune").is_empty());
    assert_eq!(store.count(), 4);
}
