//! Moving backup text to and from a user-chosen location.
//!
//! The session only needs a handle and two text operations; how the handle
//! was chosen (file picker, command-line argument) is the caller's business.

use std::{fmt, future::Future, io, path::Path};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
  #[error("failed to read {location}: {source}")]
  Read {
    location: String,
    #[source]
    source:   io::Error,
  },

  #[error("failed to write {location}: {source}")]
  Write {
    location: String,
    #[source]
    source:   io::Error,
  },
}

/// Reads and writes UTF-8 text at locations identified by [`Self::Handle`].
pub trait TransferBroker: Send + Sync {
  type Handle: fmt::Debug + Send + Sync + ?Sized;

  fn read_text<'a>(
    &'a self,
    src: &'a Self::Handle,
  ) -> impl Future<Output = Result<String, TransferError>> + Send + 'a;

  fn write_text<'a>(
    &'a self,
    dest: &'a Self::Handle,
    text: &'a str,
  ) -> impl Future<Output = Result<(), TransferError>> + Send + 'a;
}

/// Local filesystem broker; handles are paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsBroker;

impl TransferBroker for FsBroker {
  type Handle = Path;

  async fn read_text(&self, src: &Path) -> Result<String, TransferError> {
    tokio::fs::read_to_string(src)
      .await
      .map_err(|source| TransferError::Read { location: src.display().to_string(), source })
  }

  async fn write_text(&self, dest: &Path, text: &str) -> Result<(), TransferError> {
    tokio::fs::write(dest, text)
      .await
      .map_err(|source| TransferError::Write { location: dest.display().to_string(), source })
  }
}
