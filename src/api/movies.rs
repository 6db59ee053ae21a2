use std::sync::Arc;

use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;

use crate::{
    management::{CsvStore, MovieStore, StoreError},
    query,
    types::{
        CreateMovieRequest, DeleteMovieResponse, ErrorResponse, Movie, MovieKey,
        UpdateMovieRequest,
    },
    utils, warning,
};

pub type SharedStore = Arc<Mutex<CsvStore>>;

/// Error answer of the backend: a status code plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => ApiError::new(
                StatusCode::CONFLICT,
                "Movie with the same name and year already exists",
            ),
            StoreError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "Movie not found"),
            other => {
                warning!("Storage failure: {}", other);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

pub async fn list_movies(Extension(store): Extension<SharedStore>) -> Json<Vec<Movie>> {
    let store = store.lock().await;
    let mut movies = store.movies().to_vec();
    utils::sort_newest_first(&mut movies);
    Json(movies)
}

pub async fn create_movie(
    Extension(store): Extension<SharedStore>,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<Json<Movie>, ApiError> {
    let name = utils::validate_name(&payload.name)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e))?;

    let mut store = store.lock().await;
    if query::has_duplicate(store.movies(), &name, payload.year) {
        return Err(StoreError::Duplicate(name).into());
    }

    let movie = Movie {
        name,
        year: payload.year,
        director: payload.director.trim().to_string(),
        date_added: Some(payload.date_added.unwrap_or_else(utils::today)),
        notes: payload.notes.trim().to_string(),
        is_favorite: payload.is_favorite,
    };
    store.add(movie.clone()).await?;
    Ok(Json(movie))
}

pub async fn update_movie(
    Extension(store): Extension<SharedStore>,
    Json(payload): Json<UpdateMovieRequest>,
) -> Result<Json<Movie>, ApiError> {
    let name = utils::validate_name(&payload.updated.name)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e))?;

    let mut store = store.lock().await;
    let (index, original) = find(&store, &payload.original)?;

    let updated = payload.updated;
    let movie = Movie {
        name,
        year: updated.year,
        director: updated.director.trim().to_string(),
        date_added: updated.date_added.or(original.date_added),
        notes: updated.notes.trim().to_string(),
        is_favorite: updated.is_favorite,
    };

    // identity keys stay unique across the collection
    if matches!(store.position(&movie.key()), Some(other) if other != index) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Could not update movie: another movie has the same name, year and date added",
        ));
    }
    store.update(index, movie.clone()).await?;
    Ok(Json(movie))
}

pub async fn delete_movie(
    Extension(store): Extension<SharedStore>,
    Json(key): Json<MovieKey>,
) -> Result<Json<DeleteMovieResponse>, ApiError> {
    let mut store = store.lock().await;
    let (_, movie) = find(&store, &key)?;
    store.delete(&movie).await?;
    Ok(Json(DeleteMovieResponse { ok: true }))
}

/// Exact identity lookup; the first match wins.
fn find(store: &CsvStore, key: &MovieKey) -> Result<(usize, Movie), ApiError> {
    store
        .position(key)
        .and_then(|index| store.get(index).map(|m| (index, m.clone())))
        .ok_or_else(|| StoreError::NotFound(key.name.clone()).into())
}
