//! # API Module
//!
//! HTTP handlers of the movie REST backend. The handlers share one
//! [`crate::management::CsvStore`] behind an `Arc<Mutex<_>>`, handed in as an
//! axum `Extension`, so requests are applied one at a time in arrival order.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status, version and record count
//! - [`list_movies`] - `GET /movies`, newest first
//! - [`create_movie`] - `POST /movies`, `409` on a name + year duplicate
//! - [`update_movie`] - `PUT /movies`, `404` if the original key is unknown
//! - [`delete_movie`] - `POST /movies/delete`, `404` if the key is unknown
//!
//! Errors are returned as `{"detail": "..."}` with a matching status code.
//! See [`crate::server`] for the router.

mod health;
mod movies;

pub use health::health;
pub use movies::{ApiError, SharedStore, create_movie, delete_movie, list_movies, update_movie};
