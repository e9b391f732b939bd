//! SQLite-backed string record store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{StoreError, StringStore};
use crate::analysis::{StringProperties, StringRecord};

/// SQLite-backed string store.
///
/// A single connection behind a mutex; all operations are short
/// point-queries, so contention is not a concern at this scale. The
/// primary key on `id` enforces the insert-if-absent contract atomically.
pub struct SqliteStringStore {
    conn: Mutex<Connection>,
}

impl SqliteStringStore {
    /// Open (or create) the database file and its schema.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        tracing::debug!(path = %path.display(), "opening string store database");
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- One row per unique content hash
            CREATE TABLE IF NOT EXISTS string_records (
                id TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                length INTEGER NOT NULL,
                is_palindrome INTEGER NOT NULL,
                unique_characters INTEGER NOT NULL,
                word_count INTEGER NOT NULL,
                character_frequency TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_string_records_created_at
                ON string_records(created_at);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<StringRecord> {
        let id: String = row.get(0)?;
        let value: String = row.get(1)?;
        let length: u32 = row.get(2)?;
        let is_palindrome: bool = row.get(3)?;
        let unique_characters: u32 = row.get(4)?;
        let word_count: u32 = row.get(5)?;
        let frequency_json: String = row.get(6)?;
        let created_at_str: String = row.get(7)?;

        // A row this store wrote always parses; anything else is corruption
        // and must surface as an error, not load with made-up properties.
        let character_frequency_map: HashMap<char, u32> = serde_json::from_str(&frequency_json)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
            })?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(StringRecord {
            id: id.clone(),
            value,
            properties: StringProperties {
                length,
                is_palindrome,
                unique_characters,
                word_count,
                sha256_hash: id,
                character_frequency_map,
            },
            created_at,
        })
    }

    fn map_db_err(e: rusqlite::Error) -> StoreError {
        match e {
            rusqlite::Error::FromSqlConversionFailure(_, _, source) => {
                StoreError::Corrupt(source.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl StringStore for SqliteStringStore {
    fn insert_if_absent(&self, record: &StringRecord) -> Result<bool, StoreError> {
        let frequency_json = serde_json::to_string(&record.properties.character_frequency_map)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let conn = self.conn.lock().unwrap();
        let inserted = conn
            .execute(
                r#"
                INSERT OR IGNORE INTO string_records
                    (id, value, length, is_palindrome, unique_characters,
                     word_count, character_frequency, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    record.id,
                    record.value,
                    record.properties.length,
                    record.properties.is_palindrome,
                    record.properties.unique_characters,
                    record.properties.word_count,
                    frequency_json,
                    record.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(inserted == 1)
    }

    fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM string_records WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    fn get(&self, id: &str) -> Result<Option<StringRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            r#"
            SELECT id, value, length, is_palindrome, unique_characters,
                   word_count, character_frequency, created_at
            FROM string_records WHERE id = ?
            "#,
            params![id],
            Self::row_to_record,
        )
        .optional()
        .map_err(Self::map_db_err)
    }

    fn get_all(&self) -> Result<Vec<StringRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, value, length, is_palindrome, unique_characters,
                       word_count, character_frequency, created_at
                FROM string_records
                ORDER BY created_at ASC, rowid ASC
                "#,
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_record)
            .map_err(Self::map_db_err)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(Self::map_db_err)?);
        }
        Ok(records)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM string_records WHERE id = ?", params![id])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
