use chrono::NaiveDateTime;
use serde::Serialize;

/// Operator-supplied item identifier (`id_barang`)
pub type ItemId = i32;

/// One stocked good as held in the in-memory mirror.
///
/// `added_at` is the moment the entry was created in this process. It is not
/// persisted, so items reloaded from the database get the reload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    #[serde(serialize_with = "serialize_timestamp")]
    pub added_at: NaiveDateTime,
}

impl InventoryItem {
    /// Creates an item, upper-casing `name`.
    pub fn new(id: ItemId, name: &str, quantity: u32, added_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: normalize_name(name),
            quantity,
            added_at,
        }
    }

    /// Builds a mirror entry from a database row, stamping it with `loaded_at`.
    pub fn from_row(row: StoredItem, loaded_at: NaiveDateTime) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            added_at: loaded_at,
        }
    }

    /// The columns written to the database for this item
    pub fn to_row(&self) -> StoredItem {
        StoredItem {
            id: self.id,
            name: self.name.clone(),
            quantity: self.quantity,
        }
    }
}

/// A row of the `inventory` table. The table carries no creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
}

/// Item names are stored and shown in upper case
pub fn normalize_name(name: &str) -> String {
    name.to_uppercase()
}

fn serialize_timestamp<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&crate::formatters::format_timestamp(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_uppercases_name() {
        let item = InventoryItem::new(1, "rice", 50, noon());
        assert_eq!(item.name, "RICE");
    }

    #[test]
    fn normalize_handles_non_ascii() {
        assert_eq!(normalize_name("crème fraîche"), "CRÈME FRAÎCHE");
        assert_eq!(normalize_name("Gula Merah"), "GULA MERAH");
    }

    #[test]
    fn from_row_uses_load_time() {
        let row = StoredItem {
            id: 7,
            name: "SALT".to_string(),
            quantity: 3,
        };
        let item = InventoryItem::from_row(row.clone(), noon());
        assert_eq!(item.added_at, noon());
        assert_eq!(item.to_row(), row);
    }

    #[test]
    fn serializes_timestamp_in_display_format() {
        let item = InventoryItem::new(2, "oil", 4, noon());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "OIL");
        assert_eq!(json["quantity"], 4);
        assert_eq!(json["added_at"], "2026-03-14 12:00:00");
    }
}
