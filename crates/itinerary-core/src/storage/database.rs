//! SQLite-backed key-value store holding the application document.
//!
//! The whole [`AppState`] is serialized to a single JSON blob stored under
//! one key. There is no schema versioning: a blob that no longer parses is
//! treated as a failed load.

use std::path::Path;

use indoc::indoc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::data_dir;
use crate::error::StorageError;
use crate::store::AppState;

/// Key under which the application document is stored.
pub const APP_DATA_KEY: &str = "itinerary-app-data";

/// Single-table key-value store.
pub struct BlobStore {
    conn: Connection,
    key: String,
}

impl BlobStore {
    /// Open the store at `<data dir>/itinerary.db`.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("itinerary.db"))
    }

    /// Open (or create) a store file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or initialized.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory store (tests, or fallback when disk is unavailable).
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = Self {
            conn,
            key: APP_DATA_KEY.to_string(),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Use a different document key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(indoc! {"
            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "})
    }

    /// Raw value stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    pub fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Serialize `value` and store it under the document key.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.put_raw(&self.key, &json)
    }

    /// Load the document, `None` when nothing has been saved yet.
    ///
    /// # Errors
    /// Returns an error if the read fails or the stored blob does not parse.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StorageError> {
        self.get_raw(&self.key)?
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Remove the document.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![self.key])?;
        Ok(())
    }

    /// Persist `state`, logging instead of failing.
    ///
    /// Returns whether the write succeeded. The caller keeps working with
    /// its in-memory state either way.
    pub fn save_state(&self, state: &AppState) -> bool {
        match self.save(state) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save application state");
                false
            }
        }
    }

    /// Load the stored state, seeding the sample trip when absent or unreadable.
    pub fn load_state_or_seed(&self) -> AppState {
        match self.load::<AppState>() {
            Ok(Some(state)) => match state.check_place_ids() {
                Ok(()) => state,
                Err(e) => {
                    warn!(error = %e, "stored state is inconsistent, using sample trip");
                    AppState::sample()
                }
            },
            Ok(None) => {
                info!("no stored state, seeding sample trip");
                AppState::sample()
            }
            Err(e) => {
                warn!(error = %e, "failed to load application state, using sample trip");
                AppState::sample()
            }
        }
    }
}
