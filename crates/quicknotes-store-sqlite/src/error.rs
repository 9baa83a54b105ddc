//! Error type for `quicknotes-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened or its schema initialised.
  #[error("storage unavailable at {location}: {source}")]
  Unavailable {
    location: String,
    #[source]
    source:   tokio_rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
