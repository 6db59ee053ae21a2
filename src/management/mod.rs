mod csv;
mod error;
mod remote;

use chrono::NaiveDate;

pub use csv::CsvStore;
pub use error::StoreError;
pub use remote::RemoteStore;

use crate::{
    query::{self, NameMatch},
    types::Movie,
};

/// Operations shared by the file-backed and remote-backed stores.
///
/// The in-memory collection is owned by the store and only changes through
/// these calls. Each mutating call finishes its I/O before returning, and the
/// `&mut self` receiver keeps callers from overlapping them.
#[allow(async_fn_in_trait)]
pub trait MovieStore {
    /// Name comparison used by `search_by_name` for this variant.
    const NAME_MATCH: NameMatch;

    async fn load(&mut self) -> Result<(), StoreError>;

    async fn add(&mut self, movie: Movie) -> Result<(), StoreError>;

    /// Replaces the record identified by `original` with `updated`.
    async fn replace(&mut self, original: &Movie, updated: Movie) -> Result<(), StoreError>;

    async fn delete(&mut self, movie: &Movie) -> Result<(), StoreError>;

    fn movies(&self) -> &[Movie];

    /// Message of the most recent failed operation, cleared on success.
    fn last_error(&self) -> Option<&str>;

    fn count(&self) -> usize {
        self.movies().len()
    }

    fn search_by_name(&self, name: &str) -> Vec<Movie> {
        query::search_by_name(self.movies(), name, Self::NAME_MATCH)
    }

    fn search_by_director(&self, director: &str) -> Vec<Movie> {
        query::search_by_director(self.movies(), director)
    }

    fn search_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Movie> {
        query::search_by_date_range(self.movies(), start, end)
    }

    fn favorites(&self) -> Vec<Movie> {
        query::favorites(self.movies())
    }
}

/// Stores the error message of a failed result, clears it on success.
fn track<T>(last_error: &mut Option<String>, result: Result<T, StoreError>) -> Result<T, StoreError> {
    *last_error = result.as_ref().err().map(|e| e.to_string());
    result
}
