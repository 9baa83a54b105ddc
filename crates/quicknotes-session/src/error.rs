//! Error type for `quicknotes-session`.

use quicknotes_core::note::NoteId;
use thiserror::Error;

use crate::transfer::TransferError;

#[derive(Debug, Error)]
pub enum Error {
  /// Encoding or decoding the backup format failed.
  #[error(transparent)]
  Codec(#[from] quicknotes_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error(transparent)]
  Transfer(#[from] TransferError),

  #[error("note not found: {0}")]
  NotFound(NoteId),

  /// The session was asked to wait for data before [`start`] was called.
  ///
  /// [`start`]: crate::NoteSession::start
  #[error("note session is not running")]
  NotRunning,
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// Whether this error means the import text was not a valid backup.
  pub fn is_malformed_input(&self) -> bool {
    matches!(self, Self::Codec(quicknotes_core::Error::MalformedInput(_)))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
