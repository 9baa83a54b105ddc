//! Error types for `quicknotes-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The text handed to [`decode`](crate::codec::decode) is not a JSON array
  /// of note objects.
  #[error("malformed note data: {0}")]
  MalformedInput(#[source] serde_json::Error),

  #[error("failed to encode notes: {0}")]
  Encode(#[source] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
