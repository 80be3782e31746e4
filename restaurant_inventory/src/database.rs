//! SQLite persistence for the inventory table
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! The database is the source of truth; the manager's mirror follows it.

use crate::error::{InventoryError, Result};
use crate::models::{ItemId, StoredItem};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time a statement waits on a locked database before failing
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Connection parameters for the inventory database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// Returns the default database path: ~/.local/share/restaurant_inventory/inventory.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("restaurant_inventory")
        .join("inventory.db")
}

/// Row-level operations the inventory manager needs from its backing store.
///
/// `update_quantity` and `delete` report how many rows matched; zero is a
/// valid outcome, not an error.
pub trait InventoryStore {
    /// Writes a new row. Fails if the store already holds `item.id`.
    fn insert(&mut self, item: &StoredItem) -> Result<()>;
    fn update_quantity(&mut self, id: ItemId, quantity: u32) -> Result<usize>;
    fn delete(&mut self, id: ItemId) -> Result<usize>;
    /// Every row, ordered by id
    fn fetch_all(&self) -> Result<Vec<StoredItem>>;
}

/// Creates the `inventory` table if it does not already exist.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS inventory (
            id_barang     INTEGER NOT NULL PRIMARY KEY,
            nama_barang   TEXT NOT NULL,
            jumlah_barang INTEGER NOT NULL CHECK (jumlah_barang >= 0)
        );",
    )?;
    log::debug!("Inventory schema initialized");
    Ok(())
}

/// SQLite-backed store. Owns its connection, which closes when the store
/// is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database described by `config` and initialises the schema.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }
        let conn = Connection::open(&config.path)?;
        log::info!("Opened database: {}", config.path.display());
        Self::from_connection(conn, config.busy_timeout)
    }

    /// Opens a private in-memory database, used in tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    fn from_connection(conn: Connection, busy_timeout: Duration) -> Result<Self> {
        conn.busy_timeout(busy_timeout)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Path of the open database file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.conn.path().filter(|p| !p.is_empty()).map(Path::new)
    }

    /// Closes the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| InventoryError::Store(e))?;
        log::debug!("Database connection closed");
        Ok(())
    }

    /// Number of rows in the inventory table
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Looks up a single row by id
    pub fn get(&self, id: ItemId) -> Result<Option<StoredItem>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id_barang, nama_barang, jumlah_barang
             FROM inventory
             WHERE id_barang = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(StoredItem {
                id: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
            })),
            None => Ok(None),
        }
    }
}

impl InventoryStore for SqliteStore {
    fn insert(&mut self, item: &StoredItem) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO inventory (id_barang, nama_barang, jumlah_barang)
             VALUES (?1, ?2, ?3)",
        )?;
        stmt.execute(params![item.id, &item.name, item.quantity])?;
        log::debug!("Inserted inventory row {}", item.id);
        Ok(())
    }

    fn update_quantity(&mut self, id: ItemId, quantity: u32) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "UPDATE inventory SET jumlah_barang = ?1 WHERE id_barang = ?2",
        )?;
        let changed = stmt.execute(params![quantity, id])?;
        log::debug!("Updated inventory row {} ({} row(s) matched)", id, changed);
        Ok(changed)
    }

    fn delete(&mut self, id: ItemId) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM inventory WHERE id_barang = ?1")?;
        let changed = stmt.execute(params![id])?;
        log::debug!("Deleted inventory row {} ({} row(s) matched)", id, changed);
        Ok(changed)
    }

    /// Rows whose id or quantity does not fit the item model (for example a
    /// negative quantity in a table created without the CHECK constraint) are
    /// skipped with a warning instead of failing the whole listing.
    fn fetch_all(&self) -> Result<Vec<StoredItem>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id_barang, nama_barang, jumlah_barang
             FROM inventory
             ORDER BY id_barang ASC",
        )?;
        let raw_rows: Vec<(i64, String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (id, name, quantity) in raw_rows {
            match (ItemId::try_from(id), u32::try_from(quantity)) {
                (Ok(id), Ok(quantity)) => rows.push(StoredItem { id, name, quantity }),
                _ => log::warn!(
                    "Skipping inventory row {} ({}, qty {}): value out of range",
                    id,
                    name,
                    quantity
                ),
            }
        }
        Ok(rows)
    }
}
