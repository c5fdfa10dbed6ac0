//! SQLite storage accessor.
//!
//! # Design
//! One connection is opened per process and held for its lifetime. The
//! connection sits behind a `Mutex` so `Storage` is `Sync` and can be shared
//! across request handlers; each `execute`/`query` call holds the lock for a
//! single statement only. Sequences of statements are not atomic: a
//! lookup followed by a write can interleave with another request's write.
//!
//! Rows come back as column-name → `Value` maps so callers decide how to
//! decode them.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use crate::error::StorageError;

/// A single result row keyed by column name.
pub type Row = BTreeMap<String, Value>;

const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY,
    title TEXT,
    description TEXT,
    done INTEGER DEFAULT 0
)";

/// Result of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Rowid of the most recent successful insert on this connection.
    pub last_insert_id: i64,
    pub rows_affected: usize,
}

/// Owner of the process-wide SQLite connection.
#[derive(Debug)]
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening sqlite database");
        Ok(Self::from_connection(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Ensure the `todos` table exists. Safe to call more than once.
    pub fn initialize(&self) -> Result<(), StorageError> {
        self.lock()?.execute_batch(CREATE_TODOS_TABLE)?;
        tracing::debug!("todos table ready");
        Ok(())
    }

    /// Run an insert/update/delete with positional parameters.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecOutcome, StorageError> {
        let conn = self.lock()?;
        tracing::trace!(sql, params = params.len(), "execute");
        let rows_affected = conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(ExecOutcome {
            last_insert_id: conn.last_insert_rowid(),
            rows_affected,
        })
    }

    /// Run a read-only statement and collect every matching row.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StorageError> {
        let conn = self.lock()?;
        tracing::trace!(sql, params = params.len(), "query");
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            let mut mapped = Row::new();
            for (index, name) in columns.iter().enumerate() {
                mapped.insert(name.clone(), row.get::<_, Value>(index)?);
            }
            Ok(mapped)
        })?;
        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}
