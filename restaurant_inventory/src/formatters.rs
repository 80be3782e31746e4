use crate::error::InventoryError;
use crate::manager::ChangeSummary;
use crate::models::InventoryItem;
use chrono::NaiveDateTime;

/// Display pattern for every timestamp shown to the operator
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Id, name and quantity without the timestamp
pub fn format_item_summary(item: &InventoryItem) -> String {
    format!(
        "ID: {}, Name: {}, Quantity: {}",
        item.id, item.name, item.quantity
    )
}

pub fn format_item_details(item: &InventoryItem) -> String {
    format!(
        "{}, Added: {}",
        format_item_summary(item),
        format_timestamp(&item.added_at)
    )
}

pub fn format_added(item: &InventoryItem) -> String {
    format!(
        "Item added successfully!\n{}\nDate added: {}",
        format_item_summary(item),
        format_timestamp(&item.added_at)
    )
}

pub fn format_updated(summary: &ChangeSummary, quantity: u32) -> String {
    if summary.matched() {
        format!(
            "Item updated successfully! ID {} now has quantity {}.",
            summary.id, quantity
        )
    } else {
        format!(
            "Item updated successfully! (no item with ID {} was found)",
            summary.id
        )
    }
}

pub fn format_deleted(summary: &ChangeSummary) -> String {
    if summary.matched() {
        format!("Item deleted successfully! ID {} removed.", summary.id)
    } else {
        format!(
            "Item deleted successfully! (no item with ID {} was found)",
            summary.id
        )
    }
}

pub fn format_listing(items: &[InventoryItem]) -> String {
    if items.is_empty() {
        return "Inventory is empty.".to_string();
    }

    let mut output = String::new();
    for item in items {
        output.push_str(&format_item_details(item));
        output.push('\n');
    }
    let units: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();
    output.push_str(&format!(
        "Total: {} item{}, {} unit{} in stock",
        items.len(),
        if items.len() == 1 { "" } else { "s" },
        units,
        if units == 1 { "" } else { "s" }
    ));
    output
}

pub fn format_listing_json(items: &[InventoryItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}

/// Operator-facing message for a failed `action` ("adding", "updating", ...)
pub fn format_error(action: &str, error: &InventoryError) -> String {
    match error {
        InventoryError::Store(cause) => {
            format!("An error occurred while {action} the item: {cause}")
        }
        other => format!("Could not complete {action}: {other}"),
    }
}
