//! Note session controller for QuickNotes.
//!
//! Holds the authoritative in-memory view of all notes and the workflows that
//! mutate them, plus the two external collaborators the workflows need: a
//! transfer broker for backup files and an identity provider.
//!
//! Everything here is generic over [`quicknotes_core::store::NoteStore`]; the
//! concrete backend is chosen by the binary.

pub mod error;
pub mod identity;
pub mod repository;
pub mod session;
pub mod transfer;

pub use error::{Error, Result};
pub use identity::{Account, AccountFile, IdentityError, IdentityProvider};
pub use repository::NoteRepository;
pub use session::{NoteSession, SessionView};
pub use transfer::{FsBroker, TransferBroker, TransferError};
