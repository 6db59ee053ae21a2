//! Movie review tracker library.
//!
//! Keeps a list of movie reviews either in a local CSV file or behind a small
//! REST backend, and offers name/director/date/favorite queries over it.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the REST backend
//! - `backend` - HTTP client for the REST backend
//! - `cli` - Command-line interface implementations
//! - `codec` - CSV line encoding and decoding
//! - `config` - Configuration management and environment variables
//! - `management` - The file-backed and remote-backed movie stores
//! - `query` - Read-only filters over a list of movies
//! - `server` - The REST backend server
//! - `types` - Data structures and type definitions
//! - `utils` - Dates, sorting and table helpers
//!
//! # Example
//!
//! ```
//! use movielog::{management::{CsvStore, MovieStore}, types::Movie};
//!
//! #[tokio::main]
//! async fn main() -> movielog::Res<()> {
//!     let mut store = CsvStore::open("movies.csv").await?;
//!     store.load().await?;
//!     store.add(Movie::new("Dune", 2021, "Denis Villeneuve", "Great score", true)).await?;
//!     println!("{} favorites", store.favorites().len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod cli;
pub mod codec;
pub mod config;
pub mod management;
pub mod query;
pub mod server;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the application edges (CLI, server startup) where errors of
/// different kinds meet. Library code returns
/// [`management::StoreError`] instead.
///
/// # Example
///
/// ```
/// use movielog::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```ignore
/// info!("Loaded {} movies from {}", count, path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark once an operation succeeded.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits the process with status 1.
///
/// Only for the CLI layer, where a failure leaves nothing useful to do. The
/// library itself reports failures through `Result` and never calls this.
///
/// ```ignore
/// error!("Backend not reachable at {}", url);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for problems that do not stop the command, such as
/// a skipped duplicate during import.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
