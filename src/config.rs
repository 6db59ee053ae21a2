//! Configuration management for movielog.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every setting has a default, so the tool
//! works without any configuration:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

const APP_DIR: &str = "movielog";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Which persistence variant the CLI talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Csv,
    Remote,
}

/// Loads environment variables from `movielog/.env` in the local data
/// directory.
///
/// The directory is created if needed. A missing `.env` file is not an error;
/// a file that exists but cannot be parsed is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/movielog/.env`
/// - macOS: `~/Library/Application Support/movielog/.env`
/// - Windows: `%LOCALAPPDATA%/movielog/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Path of the CSV file used by the file-backed store and the server.
///
/// `MOVIELOG_CSV_PATH`, defaulting to `movies.csv` in the data directory.
pub fn csv_path() -> PathBuf {
    env::var("MOVIELOG_CSV_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("movies.csv"))
}

/// Base URL of the REST backend, e.g. `http://127.0.0.1:8000`.
pub fn api_url() -> String {
    env::var("MOVIELOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Address the `serve` command binds to.
pub fn server_addr() -> String {
    env::var("MOVIELOG_SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Per-request timeout for the remote store, from `MOVIELOG_TIMEOUT_MS`.
/// Unparsable values fall back to the default.
pub fn request_timeout() -> Duration {
    let millis = env::var("MOVIELOG_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(millis)
}

/// `MOVIELOG_BACKEND` is `csv` (default) or `remote`.
pub fn backend() -> Result<Backend, String> {
    match env::var("MOVIELOG_BACKEND") {
        Err(_) => Ok(Backend::Csv),
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "" | "csv" | "file" => Ok(Backend::Csv),
            "remote" | "rest" | "api" => Ok(Backend::Remote),
            other => Err(format!(
                "MOVIELOG_BACKEND must be 'csv' or 'remote', got '{}'",
                other
            )),
        },
    }
}
