//! SQLite storage backend.
//!
//! A single file-backed database holding one `models` table. `SqliteStore`
//! owns one connection behind a mutex; every `RecordStore` call locks it for a
//! single statement. `SqliteTransaction` exposes the same operations over an
//! open transaction so a caller can make a sequence of calls all-or-nothing.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use tracing::{debug, warn};

use crate::error::{MusterError, Result};
use crate::storage::traits::RecordStore;
use crate::storage::types::{FieldUpdate, ModelRecord, NewModel};

use row::{ModelRow, MODEL_COLUMNS};

/// Default busy timeout (ms).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS models (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    game TEXT NOT NULL,
    faction TEXT NOT NULL,
    unitName TEXT NOT NULL,
    unitSize INT,
    points INT,
    purchaseDate TEXT NOT NULL DEFAULT '',
    buildDate TEXT NOT NULL DEFAULT '',
    paintedDate TEXT NOT NULL DEFAULT '',
    image BLOB
);
"#;

/// Connection settings for a file-backed store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }
}

/// SQLite-backed record store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the table exists.
    ///
    /// Missing parent directories are created.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    MusterError::Store(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(&config.path)?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        debug!(path = %config.path.display(), "opened database");
        Self::from_connection(conn, Some(config.path.clone()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, flushing anything SQLite still holds.
    ///
    /// After calling this method the store is gone; dropping it has the same
    /// effect but swallows close errors.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| MusterError::Store("SQLite connection poisoned".to_string()))?;
        conn.close().map_err(|(_, e)| MusterError::from(e))
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MusterError::Store("SQLite connection poisoned".to_string()))
    }

    /// Number of stored models.
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM models", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Run `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns `MusterError::Store` listing every problem SQLite reports.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        let report = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        if report.len() == 1 && report[0] == "ok" {
            Ok(())
        } else {
            Err(MusterError::Store(format!(
                "Integrity check failed: {}",
                report.join("; ")
            )))
        }
    }

    /// Run `f` inside one transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back every statement it issued
    /// when it returns `Err`. The connection stays locked for the duration,
    /// so other callers of this store wait. The transaction starts
    /// `IMMEDIATE`, taking the database write lock up front so a read inside
    /// `f` never has to be upgraded to a write while another process holds it.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SqliteTransaction<'_>) -> Result<T>,
    {
        let mut conn = self.lock_conn()?;
        let tx = SqliteTransaction {
            tx: conn.transaction_with_behavior(TransactionBehavior::Immediate)?,
        };

        match f(&tx) {
            Ok(value) => {
                tx.tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

impl RecordStore for SqliteStore {
    fn insert(&self, model: &NewModel) -> Result<i64> {
        let conn = self.lock_conn()?;
        insert(&conn, model)
    }

    fn fetch_all(&self) -> Result<Vec<ModelRecord>> {
        let conn = self.lock_conn()?;
        fetch_all(&conn)
    }

    fn fetch_by_id(&self, id: i64) -> Result<ModelRecord> {
        let conn = self.lock_conn()?;
        fetch_by_id(&conn, id)
    }

    fn update_field(&self, id: i64, update: &FieldUpdate) -> Result<()> {
        let conn = self.lock_conn()?;
        update_field(&conn, id, update)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let conn = self.lock_conn()?;
        delete(&conn, id)
    }

    fn reassign_id(&self, old_id: i64, new_id: i64) -> Result<()> {
        let conn = self.lock_conn()?;
        reassign_id(&conn, old_id, new_id)
    }

    fn reset_autoincrement(&self, value: i64) -> Result<()> {
        let conn = self.lock_conn()?;
        reset_autoincrement(&conn, value)
    }
}

/// Record store view over an open transaction.
///
/// Obtained from [`SqliteStore::with_transaction`].
pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl RecordStore for SqliteTransaction<'_> {
    fn insert(&self, model: &NewModel) -> Result<i64> {
        insert(&self.tx, model)
    }

    fn fetch_all(&self) -> Result<Vec<ModelRecord>> {
        fetch_all(&self.tx)
    }

    fn fetch_by_id(&self, id: i64) -> Result<ModelRecord> {
        fetch_by_id(&self.tx, id)
    }

    fn update_field(&self, id: i64, update: &FieldUpdate) -> Result<()> {
        update_field(&self.tx, id, update)
    }

    fn delete(&self, id: i64) -> Result<()> {
        delete(&self.tx, id)
    }

    fn reassign_id(&self, old_id: i64, new_id: i64) -> Result<()> {
        reassign_id(&self.tx, old_id, new_id)
    }

    fn reset_autoincrement(&self, value: i64) -> Result<()> {
        reset_autoincrement(&self.tx, value)
    }
}

fn insert(conn: &Connection, model: &NewModel) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO models (game, faction, unitName, unitSize, points, purchaseDate)
        VALUES (?, ?, ?, ?, 0, ?)
        "#,
        (
            &model.game,
            &model.faction,
            &model.unit_name,
            model.unit_size,
            model.purchase_date.to_string(),
        ),
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, game = %model.game, unit = %model.unit_name, "inserted model");
    Ok(id)
}

fn fetch_all(conn: &Connection) -> Result<Vec<ModelRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM models ORDER BY id", MODEL_COLUMNS))?;
    let rows = stmt.query_map([], ModelRow::from_row)?;

    let mut models = Vec::new();
    for row in rows {
        models.push(row?.into());
    }
    Ok(models)
}

fn fetch_by_id(conn: &Connection, id: i64) -> Result<ModelRecord> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM models WHERE id = ?", MODEL_COLUMNS),
            [id],
            ModelRow::from_row,
        )
        .optional()?;

    row.map(ModelRecord::from).ok_or(MusterError::NotFound(id))
}

fn update_field(conn: &Connection, id: i64, update: &FieldUpdate) -> Result<()> {
    let field = update.field();
    let value = match update {
        FieldUpdate::Faction(text) | FieldUpdate::UnitName(text) => Value::Text(text.clone()),
        FieldUpdate::UnitSize(number) | FieldUpdate::Points(number) => Value::Integer(*number),
        FieldUpdate::PurchaseDate(date)
        | FieldUpdate::BuildDate(date)
        | FieldUpdate::PaintedDate(date) => Value::Text(date.to_string()),
        FieldUpdate::Image(bytes) => Value::Blob(bytes.clone()),
    };

    // Column names come from a closed enum, never from caller input.
    let changed = conn.execute(
        &format!("UPDATE models SET {} = ? WHERE id = ?", field.column()),
        (value, id),
    )?;
    debug!(id, field = %field, rows = changed, "updated field");
    Ok(())
}

fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM models WHERE id = ?", [id])?;
    debug!(id, rows = changed, "deleted model");
    Ok(())
}

fn reassign_id(conn: &Connection, old_id: i64, new_id: i64) -> Result<()> {
    let changed = conn.execute("UPDATE models SET id = ? WHERE id = ?", [new_id, old_id])?;
    debug!(old_id, new_id, rows = changed, "reassigned model id");
    Ok(())
}

fn reset_autoincrement(conn: &Connection, value: i64) -> Result<()> {
    let changed = conn.execute(
        "UPDATE sqlite_sequence SET seq = ? WHERE name = 'models'",
        [value],
    )?;
    // The sequence row only appears after the first insert.
    if changed == 0 {
        conn.execute(
            "INSERT INTO sqlite_sequence (name, seq) VALUES ('models', ?)",
            [value],
        )?;
    }
    debug!(value, "reset autoincrement counter");
    Ok(())
}
