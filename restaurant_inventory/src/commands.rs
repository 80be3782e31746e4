//! Command dispatch shared by the binary and its tests.
//!
//! Results go to `out`, store failures to `err`. A store failure is reported
//! once and turns into [`Outcome::Failed`]; every other error is returned.

use crate::database::InventoryStore;
use crate::error::{InventoryError, Result};
use crate::formatters::{
    format_added, format_deleted, format_error, format_listing, format_listing_json,
    format_updated,
};
use crate::input::{parse_name, Prompter};
use crate::manager::InventoryManager;
use crate::menu::run_menu;
use crate::models::ItemId;
use clap::Subcommand;
use std::io::{BufRead, Write};
use std::process::ExitCode;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu (default)
    Menu,
    /// Add a new item
    #[command(allow_negative_numbers = true)]
    Add {
        id: ItemId,
        name: String,
        quantity: u32,
    },
    /// Set the quantity of an item
    #[command(allow_negative_numbers = true)]
    Update { id: ItemId, quantity: u32 },
    /// Delete an item
    #[command(allow_negative_numbers = true)]
    Delete { id: ItemId },
    /// List every item
    List {
        /// Print the listing as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The store rejected the operation; the cause was written to `err`
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Runs `command` against `manager`. `input` is only read by the menu.
pub fn run_command<S, R, W, E>(
    manager: &mut InventoryManager<S>,
    command: Command,
    input: R,
    mut out: W,
    mut err: E,
) -> Result<Outcome>
where
    S: InventoryStore,
    R: BufRead,
    W: Write,
    E: Write,
{
    log::debug!("Running command {:?}", command);
    let result = match command {
        Command::Menu => {
            let mut prompter = Prompter::new(input, out);
            return run_menu(manager, &mut prompter).map(|()| Outcome::Success);
        }
        Command::Add { id, name, quantity } => {
            let name = parse_name(&name)?;
            manager
                .add(id, &name, quantity)
                .map(|item| format_added(&item))
                .map_err(|e| ("adding", e))
        }
        Command::Update { id, quantity } => manager
            .update(id, quantity)
            .map(|summary| format_updated(&summary, quantity))
            .map_err(|e| ("updating", e)),
        Command::Delete { id } => manager
            .delete(id)
            .map(|summary| format_deleted(&summary))
            .map_err(|e| ("deleting", e)),
        Command::List { json } => match manager.list() {
            Ok(items) if json => format_listing_json(&items)
                .map_err(|e| ("listing", InventoryError::from(std::io::Error::from(e)))),
            Ok(items) => Ok(format_listing(&items)),
            Err(e) => Err(("listing", e)),
        },
    };

    match result {
        Ok(text) => {
            writeln!(out, "{text}")?;
            Ok(Outcome::Success)
        }
        Err((action, e)) if e.is_store_error() => {
            writeln!(err, "{}", format_error(action, &e))?;
            Ok(Outcome::Failed)
        }
        Err((_, e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SqliteStore;
    use clap::Parser;
    use std::io::Cursor;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn test_manager() -> InventoryManager<SqliteStore> {
        InventoryManager::new(SqliteStore::open_in_memory().unwrap())
    }

    /// Runs a one-shot command, returning (outcome, stdout, stderr).
    fn run(
        manager: &mut InventoryManager<SqliteStore>,
        command: Command,
    ) -> (Outcome, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome =
            run_command(manager, command, Cursor::new(Vec::new()), &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn add(id: ItemId, name: &str, quantity: u32) -> Command {
        Command::Add {
            id,
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn add_prints_confirmation() {
        let mut manager = test_manager();
        let (outcome, out, err) = run(&mut manager, add(1, "rice", 50));

        assert_eq!(outcome, Outcome::Success);
        assert!(out.starts_with("Item added successfully!\nID: 1, Name: RICE, Quantity: 50\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn duplicate_add_fails_with_cause_on_stderr() {
        let mut manager = test_manager();
        run(&mut manager, add(1, "rice", 50));

        let (outcome, out, err) = run(&mut manager, add(1, "flour", 10));
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.is_empty());
        assert!(err.starts_with("An error occurred while adding the item: "));
        assert!(err.contains("UNIQUE constraint failed"));
        assert_eq!(manager.cached(1).unwrap().name, "RICE");
    }

    #[test]
    fn failed_outcome_maps_to_failure_exit_code() {
        assert_eq!(ExitCode::from(Outcome::Failed), ExitCode::FAILURE);
        assert_eq!(ExitCode::from(Outcome::Success), ExitCode::SUCCESS);
    }

    #[test]
    fn blank_name_is_an_input_error() {
        let mut manager = test_manager();
        let result = run_command(
            &mut manager,
            add(1, "   ", 5),
            Cursor::new(Vec::new()),
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(result, Err(InventoryError::InputShape { field: "name", .. })));
        assert_eq!(manager.store().count().unwrap(), 0);
    }

    #[test]
    fn update_and_delete_report_soft_noops() {
        let mut manager = test_manager();
        let (outcome, out, _) = run(&mut manager, Command::Update { id: 999, quantity: 5 });
        assert_eq!(outcome, Outcome::Success);
        assert!(out.contains("no item with ID 999"));

        let (outcome, out, _) = run(&mut manager, Command::Delete { id: 999 });
        assert_eq!(outcome, Outcome::Success);
        assert!(out.contains("no item with ID 999"));
    }

    #[test]
    fn list_json_outputs_items() {
        let mut manager = test_manager();
        run(&mut manager, add(2, "eggs", 24));
        run(&mut manager, add(1, "rice", 50));

        let (outcome, out, err) = run(&mut manager, Command::List { json: true });
        assert_eq!(outcome, Outcome::Success);
        assert!(err.is_empty());

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[0]["name"], "RICE");
        assert_eq!(items[1]["quantity"], 24);
    }

    #[test]
    fn list_plain_on_empty_store() {
        let mut manager = test_manager();
        let (_, out, _) = run(&mut manager, Command::List { json: false });
        assert_eq!(out, "Inventory is empty.\n");
    }

    #[test]
    fn menu_reads_from_input() {
        let mut manager = test_manager();
        let mut out = Vec::new();
        let outcome = run_command(
            &mut manager,
            Command::Menu,
            Cursor::new(b"1\n3\nsugar\n4\n5\n".to_vec()),
            &mut out,
            Vec::new(),
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert!(String::from_utf8(out).unwrap().ends_with("Exiting...\n"));
        assert_eq!(manager.cached(3).unwrap().quantity, 4);
    }

    #[test]
    fn negative_ids_parse_on_the_command_line() {
        let cli = TestCli::try_parse_from(["restaurant_inventory", "delete", "-3"]).unwrap();
        assert_eq!(cli.command, Command::Delete { id: -3 });

        let cli =
            TestCli::try_parse_from(["restaurant_inventory", "add", "-1", "rice", "5"]).unwrap();
        assert_eq!(cli.command, add(-1, "rice", 5));

        let cli = TestCli::try_parse_from(["restaurant_inventory", "list", "--json"]).unwrap();
        assert_eq!(cli.command, Command::List { json: true });
    }
}
