use std::time::Duration;

use reqwest::Client;

use crate::{
    backend::{self, movies},
    query::NameMatch,
    types::{CreateMovieRequest, Movie, UpdateMovieRequest},
    utils,
};

use super::{MovieStore, StoreError, track};

/// Remote-backed store. Every mutation is sent to the backend first; the
/// in-memory collection only changes after the backend accepted it, and then
/// with the record the backend returned.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    movies: Vec<Movie>,
    last_error: Option<String>,
}

impl RemoteStore {
    /// Creates a store talking to `base_url`, bounding each request by
    /// `timeout`. No request is made until `load` or `wait_until_ready`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            client: backend::client(timeout)?,
            base_url: base_url.into(),
            movies: Vec::new(),
            last_error: None,
        })
    }

    /// Liveness probe: a single `GET /movies` raced against `timeout`.
    ///
    /// Returns `true` when the request completed without a transport error
    /// before the timer fired. Never retries.
    pub async fn wait_until_ready(&mut self, timeout: Duration) -> bool {
        let probe = movies::ping(&self.client, &self.base_url);
        let result = match tokio::time::timeout(timeout, probe).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(StoreError::TransportError(e)),
            Err(_) => Err(StoreError::Timeout(timeout)),
        };
        track(&mut self.last_error, result).is_ok()
    }

    pub async fn load(&mut self) -> Result<(), StoreError> {
        let result = movies::list_movies(&self.client, &self.base_url)
            .await
            .map(|fetched| {
                self.movies = fetched;
            });
        track(&mut self.last_error, result)
    }

    pub async fn add(&mut self, movie: Movie) -> Result<(), StoreError> {
        let mut request = CreateMovieRequest::from(&movie);
        request.date_added.get_or_insert_with(utils::today);

        let result = movies::create_movie(&self.client, &self.base_url, &request)
            .await
            .map(|created| self.movies.push(created));
        track(&mut self.last_error, result)
    }

    /// Sends `original`'s identity together with the full `updated` record.
    ///
    /// When no local record matches `original` the backend has still applied
    /// the change; the local view stays stale until the next `load`.
    pub async fn update(&mut self, original: &Movie, updated: Movie) -> Result<(), StoreError> {
        let request = UpdateMovieRequest {
            original: original.key(),
            updated,
        };

        let result = movies::update_movie(&self.client, &self.base_url, &request)
            .await
            .map(|canonical| {
                if let Some(slot) = self.movies.iter_mut().find(|m| request.original.matches(m)) {
                    *slot = canonical;
                }
            });
        track(&mut self.last_error, result)
    }

    pub async fn delete(&mut self, movie: &Movie) -> Result<(), StoreError> {
        let key = movie.key();
        let result = movies::delete_movie(&self.client, &self.base_url, &key)
            .await
            .map(|()| {
                if let Some(index) = self.movies.iter().position(|m| key.matches(m)) {
                    self.movies.remove(index);
                }
            });
        track(&mut self.last_error, result)
    }
}

impl MovieStore for RemoteStore {
    const NAME_MATCH: NameMatch = NameMatch::Contains;

    async fn load(&mut self) -> Result<(), StoreError> {
        RemoteStore::load(self).await
    }

    async fn add(&mut self, movie: Movie) -> Result<(), StoreError> {
        RemoteStore::add(self, movie).await
    }

    async fn replace(&mut self, original: &Movie, updated: Movie) -> Result<(), StoreError> {
        RemoteStore::update(self, original, updated).await
    }

    async fn delete(&mut self, movie: &Movie) -> Result<(), StoreError> {
        RemoteStore::delete(self, movie).await
    }

    fn movies(&self) -> &[Movie] {
        &self.movies
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
