//! Local storage backed by SQLite.
//!
//! # Responsibility
//! - Open the connection that stands in for browser local storage.
//! - Bring its schema up to date before any key is read.
//! - Provide key/value access to the `local_storage` table.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Only the session profile is persisted; entity collections never are.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod local_storage;
pub mod migrations;
mod open;

pub use local_storage::{LocalStorage, SqliteLocalStorage};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Local storage failure.
#[derive(Debug)]
pub enum DbError {
    /// Connection setup or a key/value statement failed.
    Sqlite(rusqlite::Error),
    /// The migration to `version` failed; earlier versions stay applied.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Migration { .. } => "migration_failed",
            Self::SchemaTooNew { .. } => "schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "local storage error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "local storage migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "local storage schema {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
