//! Key/value storage and whole-state persistence.
//!
//! # Responsibility
//! - Define the key/value storage capability (`KeyValueStore`) and its
//!   SQLite and in-memory implementations.
//! - Restore the state at startup and save it after every change.
//!
//! # Invariants
//! - Persistence is an external collaborator of the store: every failure is
//!   logged and swallowed, never propagated into dispatch.

pub mod kv_store;
pub mod state_persistence;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Key/value storage and (de)serialization errors.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Json(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid persisted state: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
