//! Implements the store traits on top of a single SQLite connection.

mod analytics;
mod category;
mod transaction;
mod user;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Code 787 occurs when a FOREIGN KEY constraint failed.
const FOREIGN_KEY_CONSTRAINT_FAILED: i32 = 787;

/// Persists users, categories and transactions in a SQLite database.
///
/// Clones share the same connection.
#[derive(Debug, Clone)]
pub struct SQLiteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteStore {
    /// Create a store backed by `connection`.
    ///
    /// The caller should ensure the database has been initialized with
    /// [initialize](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Initialize the database behind `connection` and wrap it in a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables could not be created.
    pub fn open(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self::new(Arc::new(Mutex::new(connection))))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

/// Whether `error` is a failed foreign key check.
fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(sql_error, _)
            if sql_error.extended_code == FOREIGN_KEY_CONSTRAINT_FAILED
    )
}
