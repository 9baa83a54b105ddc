//! Core types and trait definitions for QuickNotes.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! The SQLite backend, the session controller and the CLI all depend on it.

pub mod clock;
pub mod codec;
pub mod error;
pub mod note;
pub mod search;
pub mod store;

pub use error::{Error, Result};
pub use note::{Note, NoteId, Snapshot};
