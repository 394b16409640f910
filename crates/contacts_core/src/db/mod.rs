//! SQLite backing for the key-value slot.
//!
//! # Invariants
//! - `kv_store` versions are tracked via `PRAGMA user_version`.
//! - No key-value access happens before migrations succeed.
//! - Migrations cover the storage table only; the contact blob has no schema version.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to provide a ready `kv_store` connection.
#[derive(Debug)]
pub enum DbError {
    /// The connection itself could not be established.
    Open(rusqlite::Error),
    /// A statement on an open connection failed.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build; it is left untouched.
    StorageTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Stable `error_code` value for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open(_) => "db_open_failed",
            Self::Sqlite(_) => "db_bootstrap_failed",
            Self::StorageTooNew { .. } => "storage_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open contact storage: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::StorageTooNew { found, supported } => write!(
                f,
                "contact storage version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Sqlite(err) => Some(err),
            Self::StorageTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
