//! SQLite-backed profile store: one key-value table holding the profile blob.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::{decode_blob, FarmProfile, ProfileStore, ProfileStoreError, PROFILE_KEY};

fn storage_err(e: impl std::fmt::Display) -> ProfileStoreError {
    ProfileStoreError::Storage(e.to_string())
}

/// Persists the profile in table `kv (key, value)` under [`PROFILE_KEY`].
pub struct SqliteProfileStore {
    db_path: PathBuf,
}

impl SqliteProfileStore {
    /// Opens or creates the database file and the table. Parent directories are created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ProfileStoreError> {
        let db_path = path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(storage_err)?;
        }
        let conn = rusqlite::Connection::open(&db_path).map_err(storage_err)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(storage_err)?;
        Ok(Self { db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, ProfileStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = rusqlite::Connection::open(&db_path).map_err(storage_err)?;
            f(&conn).map_err(storage_err)
        })
        .await
        .map_err(storage_err)?
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn load(&self) -> Result<FarmProfile, ProfileStoreError> {
        let blob: Option<String> = self
            .with_conn(|conn| {
                conn.query_row(
                    "SELECT value FROM kv WHERE key = ?1",
                    params![PROFILE_KEY],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;
        Ok(decode_blob(blob.as_deref()))
    }

    async fn save(&self, profile: &FarmProfile) -> Result<(), ProfileStoreError> {
        let blob = serde_json::to_string(profile)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![PROFILE_KEY, blob],
            )
            .map(|_| ())
        })
        .await?;
        tracing::info!(path = %self.db_path.display(), "profile saved");
        Ok(())
    }

    async fn reset(&self) -> Result<(), ProfileStoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![PROFILE_KEY])
                .map(|_| ())
        })
        .await?;
        tracing::info!(path = %self.db_path.display(), "profile reset");
        Ok(())
    }
}
