//! # Backend Client Module
//!
//! Thin HTTP client for the movie REST backend. Each function maps to exactly
//! one endpoint, sends one request, and returns the decoded result. There is no
//! retry logic here: a failed call surfaces immediately and the caller decides
//! what to do next.
//!
//! ## Endpoints
//!
//! - `GET /movies` - [`movies::list_movies`]
//! - `POST /movies` - [`movies::create_movie`]
//! - `PUT /movies` - [`movies::update_movie`]
//! - `POST /movies/delete` - [`movies::delete_movie`]
//!
//! [`movies::ping`] issues the same `GET /movies` request but only reports
//! whether the transport succeeded; it backs the readiness probe of
//! [`crate::management::RemoteStore`].
//!
//! ## Errors
//!
//! All functions return [`crate::management::StoreError`]:
//! - `TransportError` for connection failures and timeouts
//! - `StatusError` for non-success responses, carrying the backend's `detail`
//! - `InvalidResponse` for bodies that are not the expected JSON shape
//!
//! ## Timeouts
//!
//! Timeouts are a property of the `reqwest::Client` handed in by the caller;
//! see [`client`].

pub mod movies;

use std::time::Duration;

use reqwest::Client;

use crate::management::StoreError;

/// Builds a client whose every request is bounded by `timeout`.
pub fn client(timeout: Duration) -> Result<Client, StoreError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
