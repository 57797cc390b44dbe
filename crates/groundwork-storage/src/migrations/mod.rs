//! Schema migrations tracked with PRAGMA user_version.

mod v001_documents;
mod v002_fts5_index;

use groundwork_core::errors::StorageError;
use rusqlite::Connection;

pub const LATEST_VERSION: u32 = 2;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[
        (v001_documents::MIGRATION_SQL, 1),
        (v002_fts5_index::MIGRATION_SQL, 2),
    ];

    for (sql, version) in migrations {
        if current >= *version {
            continue;
        }
        conn.execute_batch(sql)
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        tracing::info!(version = version, "applied migration");
    }

    Ok(())
}

pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
