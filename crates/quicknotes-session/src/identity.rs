//! Signed-in state.
//!
//! Notes are only reachable while a user is signed in. The session layer does
//! not care how sign-in happened; it only asks [`IdentityProvider`] whether a
//! user is present and how to sign them out.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use quicknotes_core::clock::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
  #[error("account file {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("account file {} is corrupt: {source}", path.display())]
  Corrupt {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("account name must not be blank")]
  BlankAccount,
}

/// Presence of an authenticated user.
pub trait IdentityProvider {
  fn is_authenticated(&self) -> bool;

  /// End the current session. Signing out when nobody is signed in is not an
  /// error.
  fn sign_out(&self) -> Result<(), IdentityError>;
}

/// The signed-in account as persisted by [`AccountFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub name:         String,
  /// Milliseconds since the Unix epoch.
  pub signed_in_at: i64,
}

/// Keeps the signed-in account in a small JSON file. The file exists exactly
/// while someone is signed in.
#[derive(Debug, Clone)]
pub struct AccountFile {
  path: PathBuf,
}

impl AccountFile {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// The signed-in account, if any.
  pub fn current(&self) -> Result<Option<Account>, IdentityError> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => return Err(IdentityError::Io { path: self.path.clone(), source }),
    };
    serde_json::from_str(&raw)
      .map(Some)
      .map_err(|source| IdentityError::Corrupt { path: self.path.clone(), source })
  }

  /// Record `name` as signed in, replacing any previous account.
  pub fn sign_in(&self, name: &str) -> Result<Account, IdentityError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(IdentityError::BlankAccount);
    }

    let account = Account {
      name:         name.to_owned(),
      signed_in_at: SystemClock.now_millis(),
    };
    let io_err = |source| IdentityError::Io { path: self.path.clone(), source };

    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(&account)
      .map_err(|source| IdentityError::Corrupt { path: self.path.clone(), source })?;
    fs::write(&self.path, json).map_err(io_err)?;

    tracing::info!(account = %account.name, "signed in");
    Ok(account)
  }
}

impl IdentityProvider for AccountFile {
  fn is_authenticated(&self) -> bool {
    match self.current() {
      Ok(account) => account.is_some(),
      Err(e) => {
        tracing::warn!("treating unreadable account file as signed out: {e}");
        false
      }
    }
  }

  fn sign_out(&self) -> Result<(), IdentityError> {
    match fs::remove_file(&self.path) {
      Ok(()) => {
        tracing::info!("signed out");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(source) => Err(IdentityError::Io { path: self.path.clone(), source }),
    }
  }
}
