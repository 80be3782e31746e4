//! Inventory manager: CRUD against the store plus an in-memory mirror.
//!
//! Every operation talks to the store first and only touches the mirror once
//! the store call has succeeded. A store error therefore leaves the mirror as
//! it was before the operation.
//!
//! The mirror is only guaranteed to match the store right after [`InventoryManager::list`].
//! Entries appear through `add` and `list`; `update` patches an entry only if
//! it is already mirrored, and drops it when the store no longer has the row.

use crate::database::InventoryStore;
use crate::error::Result;
use crate::models::{InventoryItem, ItemId};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Outcome of an update or delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSummary {
    pub id: ItemId,
    /// Rows the store reported as matched
    pub rows_affected: usize,
}

impl ChangeSummary {
    /// False when no stored item had this id (a soft no-op)
    pub fn matched(&self) -> bool {
        self.rows_affected > 0
    }
}

/// Local wall-clock time, second precision
pub fn now() -> NaiveDateTime {
    use chrono::{Local, Timelike};
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub struct InventoryManager<S: InventoryStore> {
    store: S,
    mirror: BTreeMap<ItemId, InventoryItem>,
}

impl<S: InventoryStore> InventoryManager<S> {
    /// Wraps `store` with an empty mirror.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mirror: BTreeMap::new(),
        }
    }

    /// Adds a new item stamped with the current time.
    ///
    /// The id is not checked beforehand; a duplicate surfaces as a store error
    /// and nothing is mirrored.
    pub fn add(&mut self, id: ItemId, name: &str, quantity: u32) -> Result<InventoryItem> {
        self.add_at(id, name, quantity, now())
    }

    /// [`Self::add`] with an explicit timestamp. Used in tests.
    pub fn add_at(
        &mut self,
        id: ItemId,
        name: &str,
        quantity: u32,
        added_at: NaiveDateTime,
    ) -> Result<InventoryItem> {
        let item = InventoryItem::new(id, name, quantity, added_at);
        if let Err(e) = self.store.insert(&item.to_row()) {
            log::error!("Failed to add item {}: {}", id, e);
            return Err(e);
        }
        self.mirror.insert(id, item.clone());
        log::info!("Added item {} ({}, qty {})", id, item.name, quantity);
        Ok(item)
    }

    /// Sets the quantity of `id`. Succeeds even if no stored item matches, in
    /// which case any mirrored entry for `id` is dropped.
    pub fn update(&mut self, id: ItemId, quantity: u32) -> Result<ChangeSummary> {
        let rows_affected = match self.store.update_quantity(id, quantity) {
            Ok(n) => n,
            Err(e) => {
                log::error!("Failed to update item {}: {}", id, e);
                return Err(e);
            }
        };
        if rows_affected == 0 {
            // Row vanished from the store; a stale entry must not survive.
            self.mirror.remove(&id);
        } else if let Some(item) = self.mirror.get_mut(&id) {
            item.quantity = quantity;
        }
        log::info!(
            "Updated item {} to qty {} ({} row(s) matched)",
            id,
            quantity,
            rows_affected
        );
        Ok(ChangeSummary { id, rows_affected })
    }

    /// Removes `id` from the store and the mirror. Succeeds even if absent.
    pub fn delete(&mut self, id: ItemId) -> Result<ChangeSummary> {
        let rows_affected = match self.store.delete(id) {
            Ok(n) => n,
            Err(e) => {
                log::error!("Failed to delete item {}: {}", id, e);
                return Err(e);
            }
        };
        self.mirror.remove(&id);
        log::info!("Deleted item {} ({} row(s) matched)", id, rows_affected);
        Ok(ChangeSummary { id, rows_affected })
    }

    /// Reloads the mirror from the store and returns its items ordered by id.
    pub fn list(&mut self) -> Result<Vec<InventoryItem>> {
        self.list_at(now())
    }

    /// [`Self::list`] with an explicit reload time. Used in tests.
    ///
    /// Rows are read before the mirror is cleared, so a failed read keeps the
    /// previous mirror.
    pub fn list_at(&mut self, loaded_at: NaiveDateTime) -> Result<Vec<InventoryItem>> {
        let rows = match self.store.fetch_all() {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("Failed to load inventory: {}", e);
                return Err(e);
            }
        };
        self.mirror = rows
            .into_iter()
            .map(|row| (row.id, InventoryItem::from_row(row, loaded_at)))
            .collect();
        log::debug!("Reloaded {} item(s) into mirror", self.mirror.len());
        Ok(self.mirror.values().cloned().collect())
    }

    /// Mirrored entry for `id`, if any
    pub fn cached(&self, id: ItemId) -> Option<&InventoryItem> {
        self.mirror.get(&id)
    }

    /// Mirrored items in id order
    pub fn mirror(&self) -> impl Iterator<Item = &InventoryItem> {
        self.mirror.values()
    }

    pub fn mirror_len(&self) -> usize {
        self.mirror.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives back the store, dropping the mirror.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
