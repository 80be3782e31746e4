//! Interactive menu loop.

use crate::database::InventoryStore;
use crate::error::{InventoryError, Result};
use crate::formatters::{
    format_added, format_deleted, format_error, format_listing, format_timestamp, format_updated,
};
use crate::input::Prompter;
use crate::manager::{now, InventoryManager};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    List,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Add,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::List,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::Add => 1,
            MenuChoice::Update => 2,
            MenuChoice::Delete => 3,
            MenuChoice::List => 4,
            MenuChoice::Exit => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Item",
            MenuChoice::Update => "Update Item",
            MenuChoice::Delete => "Delete Item",
            MenuChoice::List => "View Items",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.number() == n)
    }
}

/// Parses a menu selection. Both non-numeric and out-of-range input are
/// input-shape errors.
pub fn parse_choice(input: &str) -> Result<MenuChoice> {
    let trimmed = input.trim();
    let number: u8 = trimmed.parse().map_err(|_| {
        InventoryError::input_shape("choice", trimmed, "choice must be a number between 1-5")
    })?;
    MenuChoice::from_number(number)
        .ok_or_else(|| InventoryError::input_shape("choice", trimmed, "no such menu option"))
}

fn menu_header() -> String {
    let mut header = format!(
        "\n--- Inventory Management ---\nDate and Time: {}\n",
        format_timestamp(&now())
    );
    for choice in MenuChoice::ALL {
        header.push_str(&format!("{}. {}\n", choice.number(), choice.title()));
    }
    header
}

/// Runs the menu until the operator picks Exit or input ends.
///
/// Store failures are reported and the loop carries on; only console I/O
/// errors end it early.
pub fn run_menu<S, R, W>(
    manager: &mut InventoryManager<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    S: InventoryStore,
    R: BufRead,
    W: Write,
{
    log::debug!("Menu session started");
    loop {
        prompter.say(&menu_header())?;
        let line = match prompter.read_line("Enter your choice: ") {
            Ok(line) => line,
            Err(InventoryError::InputClosed) => {
                log::info!("Input closed, leaving menu");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let choice = match parse_choice(&line) {
            Ok(choice) => choice,
            Err(e) => {
                prompter.say(&format!("{e}. Please try again."))?;
                continue;
            }
        };

        let result = match choice {
            MenuChoice::Add => add_item(manager, prompter),
            MenuChoice::Update => update_item(manager, prompter),
            MenuChoice::Delete => delete_item(manager, prompter),
            MenuChoice::List => view_items(manager, prompter),
            MenuChoice::Exit => {
                prompter.say("Exiting...")?;
                return Ok(());
            }
        };

        match result {
            Ok(()) => {}
            Err(InventoryError::InputClosed) => {
                log::info!("Input closed, leaving menu");
                return Ok(());
            }
            Err(e @ InventoryError::Store(_)) => {
                let action = match choice {
                    MenuChoice::Add => "adding",
                    MenuChoice::Update => "updating",
                    MenuChoice::Delete => "deleting",
                    _ => "listing",
                };
                prompter.say(&format_error(action, &e))?;
            }
            Err(e) => return Err(e),
        }
    }
}

fn add_item<S: InventoryStore, R: BufRead, W: Write>(
    manager: &mut InventoryManager<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let id = prompter.ask_id("Enter Item ID: ")?;
    let name = prompter.ask_name("Enter Item Name: ")?;
    let quantity = prompter.ask_quantity("Enter Item Quantity: ")?;

    let item = manager.add(id, &name, quantity)?;
    prompter.say(&format_added(&item))
}

fn update_item<S: InventoryStore, R: BufRead, W: Write>(
    manager: &mut InventoryManager<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let id = prompter.ask_id("Enter the ID of the item to update: ")?;
    let quantity = prompter.ask_quantity("Enter the new quantity: ")?;

    let summary = manager.update(id, quantity)?;
    prompter.say(&format_updated(&summary, quantity))
}

fn delete_item<S: InventoryStore, R: BufRead, W: Write>(
    manager: &mut InventoryManager<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let id = prompter.ask_id("Enter the ID of the item to delete: ")?;

    let summary = manager.delete(id)?;
    prompter.say(&format_deleted(&summary))
}

fn view_items<S: InventoryStore, R: BufRead, W: Write>(
    manager: &mut InventoryManager<S>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let items = manager.list()?;
    prompter.say(&format_listing(&items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_round_trip_through_numbers() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::from_number(choice.number()), Some(choice));
        }
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(6), None);
    }

    #[test]
    fn parse_choice_accepts_menu_numbers() {
        assert_eq!(parse_choice("1").unwrap(), MenuChoice::Add);
        assert_eq!(parse_choice(" 4\n").unwrap(), MenuChoice::List);
        assert_eq!(parse_choice("5").unwrap(), MenuChoice::Exit);
    }

    #[test]
    fn parse_choice_rejects_out_of_range_and_text() {
        for bad in ["0", "6", "42", "-1", "x", ""] {
            assert!(
                matches!(
                    parse_choice(bad),
                    Err(InventoryError::InputShape { field: "choice", .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn header_lists_every_option() {
        let header = menu_header();
        assert!(header.contains("--- Inventory Management ---"));
        assert!(header.contains("1. Add Item"));
        assert!(header.contains("5. Exit"));
    }
}
