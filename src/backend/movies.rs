use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    management::StoreError,
    types::{CreateMovieRequest, ErrorResponse, Movie, MovieKey, UpdateMovieRequest},
};

use super::endpoint;

/// Fetches the full collection from `GET /movies`.
///
/// The body must be a JSON array. Entries that do not decode into a
/// [`Movie`] are dropped rather than failing the whole call.
///
/// # Errors
///
/// - `TransportError` if the request could not be completed
/// - `StatusError` for any non-success status
/// - `InvalidResponse` if the body is not a JSON array
pub async fn list_movies(client: &Client, base_url: &str) -> Result<Vec<Movie>, StoreError> {
    let response = client.get(endpoint(base_url, "/movies")).send().await?;
    let body = success_body(response).await?;

    let value: Value = serde_json::from_str(&body)?;
    let Value::Array(items) = value else {
        return Err(StoreError::InvalidResponse(
            "expected a JSON array of movies".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Movie>(item).ok())
        .collect())
}

/// Creates a record through `POST /movies` and returns the backend's
/// canonical copy of it.
pub async fn create_movie(
    client: &Client,
    base_url: &str,
    request: &CreateMovieRequest,
) -> Result<Movie, StoreError> {
    let response = client
        .post(endpoint(base_url, "/movies"))
        .json(request)
        .send()
        .await?;
    decode(response).await
}

/// Replaces the record addressed by `request.original` through `PUT /movies`.
pub async fn update_movie(
    client: &Client,
    base_url: &str,
    request: &UpdateMovieRequest,
) -> Result<Movie, StoreError> {
    let response = client
        .put(endpoint(base_url, "/movies"))
        .json(request)
        .send()
        .await?;
    decode(response).await
}

/// Deletes the record addressed by `key`. Any success status counts; the body
/// is ignored.
pub async fn delete_movie(client: &Client, base_url: &str, key: &MovieKey) -> Result<(), StoreError> {
    let response = client
        .post(endpoint(base_url, "/movies/delete"))
        .json(key)
        .send()
        .await?;
    success_body(response).await.map(|_| ())
}

/// One `GET /movies` round trip. Only transport failures count as errors;
/// the status code is not inspected.
pub async fn ping(client: &Client, base_url: &str) -> Result<(), reqwest::Error> {
    client.get(endpoint(base_url, "/movies")).send().await?;
    Ok(())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let body = success_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

async fn success_body(response: Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }

    // the backend answers errors as {"detail": "..."}; fall back to the raw body
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.detail)
        .unwrap_or(body);
    Err(StoreError::StatusError { status, detail })
}
