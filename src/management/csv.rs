use std::path::{Path, PathBuf};

use crate::{
    codec::{self, CSV_HEADER},
    query::NameMatch,
    types::{Movie, MovieKey},
};

use super::{MovieStore, StoreError, track};

/// File-backed store. The whole collection is rewritten to the CSV file after
/// every mutation; a mutation whose write fails is undone in memory so the
/// collection never runs ahead of the file.
pub struct CsvStore {
    path: PathBuf,
    movies: Vec<Movie>,
    last_error: Option<String>,
}

impl CsvStore {
    /// Opens the store, creating the file with only a header line if it does
    /// not exist yet. The collection starts empty until `load` is called.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if async_fs::metadata(&path).await.is_err() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    async_fs::create_dir_all(parent).await?;
                }
            }
            async_fs::write(&path, format!("{}\n", CSV_HEADER)).await?;
        }

        Ok(Self {
            path,
            movies: Vec::new(),
            last_error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the collection with the file's contents. On a read failure the
    /// previous collection is kept.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let result = self.read_all().await.map(|movies| {
            self.movies = movies;
        });
        track(&mut self.last_error, result)
    }

    pub async fn save(&mut self) -> Result<(), StoreError> {
        let result = self.write_all().await;
        track(&mut self.last_error, result)
    }

    pub async fn add(&mut self, movie: Movie) -> Result<(), StoreError> {
        self.movies.push(movie);
        let result = self.write_all().await;
        if result.is_err() {
            self.movies.pop();
        }
        track(&mut self.last_error, result)
    }

    /// Replaces the record at `index` in place.
    pub async fn update(&mut self, index: usize, movie: Movie) -> Result<(), StoreError> {
        if index >= self.movies.len() {
            return track(&mut self.last_error, Err(StoreError::InvalidIndex(index)));
        }

        let previous = std::mem::replace(&mut self.movies[index], movie);
        let result = self.write_all().await;
        if result.is_err() {
            self.movies[index] = previous;
        }
        track(&mut self.last_error, result)
    }

    /// Removes the first record sharing `movie`'s identity. Performs no I/O
    /// when nothing matches.
    pub async fn delete(&mut self, movie: &Movie) -> Result<(), StoreError> {
        let Some(index) = self.position(&movie.key()) else {
            return track(
                &mut self.last_error,
                Err(StoreError::NotFound(movie.name.clone())),
            );
        };

        let removed = self.movies.remove(index);
        let result = self.write_all().await;
        if result.is_err() {
            self.movies.insert(index, removed);
        }
        track(&mut self.last_error, result)
    }

    pub async fn replace(&mut self, original: &Movie, updated: Movie) -> Result<(), StoreError> {
        match self.position(&original.key()) {
            Some(index) => self.update(index, updated).await,
            None => track(
                &mut self.last_error,
                Err(StoreError::NotFound(original.name.clone())),
            ),
        }
    }

    pub fn position(&self, key: &MovieKey) -> Option<usize> {
        self.movies.iter().position(|m| key.matches(m))
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    async fn read_all(&self) -> Result<Vec<Movie>, StoreError> {
        let content = async_fs::read_to_string(&self.path).await?;
        Ok(content
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(codec::decode)
            .filter(Movie::is_valid)
            .collect())
    }

    async fn write_all(&self) -> Result<(), StoreError> {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for movie in &self.movies {
            out.push_str(&codec::encode(movie));
            out.push('\n');
        }
        async_fs::write(&self.path, out).await?;
        Ok(())
    }
}

impl MovieStore for CsvStore {
    const NAME_MATCH: NameMatch = NameMatch::Exact;

    async fn load(&mut self) -> Result<(), StoreError> {
        CsvStore::load(self).await
    }

    async fn add(&mut self, movie: Movie) -> Result<(), StoreError> {
        CsvStore::add(self, movie).await
    }

    async fn replace(&mut self, original: &Movie, updated: Movie) -> Result<(), StoreError> {
        CsvStore::replace(self, original, updated).await
    }

    async fn delete(&mut self, movie: &Movie) -> Result<(), StoreError> {
        CsvStore::delete(self, movie).await
    }

    fn movies(&self) -> &[Movie] {
        &self.movies
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
