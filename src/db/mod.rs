mod blob;
mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::ExpenseRecord;

/// Source of the raw expense list.
///
/// `load` never fails: missing or unreadable data is an empty list.
/// `append` refuses to write over data it could not read.
pub(crate) trait ExpenseStore {
    fn load(&self) -> Vec<ExpenseRecord>;
    fn append(&mut self, record: ExpenseRecord) -> Result<()>;
    fn persist(&mut self, records: &[ExpenseRecord]) -> Result<()>;
}

/// SQLite-backed key-value store. Expenses live as one JSON blob.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Key-value ─────────────────────────────────────────────

    pub(crate) fn get_value(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Read the stored expenses, propagating SQLite and decoding errors.
    ///
    /// Write paths build on this so an unreadable blob is never replaced.
    pub(crate) fn load_strict(&self) -> Result<Vec<ExpenseRecord>> {
        let Some(blob) = self
            .get_value(schema::EXPENSES_KEY)
            .context("Could not read expenses")?
        else {
            return Ok(Vec::new());
        };
        let records = blob::decode(&blob)?;
        tracing::debug!(count = records.len(), "Loaded expenses");
        Ok(records)
    }
}

impl ExpenseStore for Database {
    fn load(&self) -> Vec<ExpenseRecord> {
        self.load_strict().unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored expenses, using empty list: {e:#}");
            Vec::new()
        })
    }

    fn append(&mut self, record: ExpenseRecord) -> Result<()> {
        let mut records = self
            .load_strict()
            .context("Refusing to overwrite unreadable expenses")?;
        records.push(record);
        self.persist(&records)
    }

    fn persist(&mut self, records: &[ExpenseRecord]) -> Result<()> {
        let blob = blob::encode(records)?;
        self.set_value(schema::EXPENSES_KEY, &blob)
            .context("Failed to save expenses")?;
        tracing::info!(count = records.len(), "Saved expenses");
        Ok(())
    }
}
