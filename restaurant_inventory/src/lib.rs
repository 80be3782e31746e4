//! Restaurant Inventory - stock tracking over SQLite
//!
//! Keeps an `inventory` table and an in-memory mirror of its items in step
//! across add, update, delete and list operations.

pub mod commands;
pub mod database;
pub mod error;
pub mod formatters;
pub mod input;
pub mod manager;
pub mod menu;
pub mod models;

pub use commands::{run_command, Command, Outcome};
pub use database::{default_db_path, InventoryStore, SqliteStore, StoreConfig};
pub use error::{InventoryError, Result};
pub use manager::{ChangeSummary, InventoryManager};
pub use models::{InventoryItem, ItemId, StoredItem};
