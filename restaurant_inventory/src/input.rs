//! Console input collection.
//!
//! Parsing failures become [`InventoryError::InputShape`] and are handled here
//! by re-prompting; they never reach the manager.

use crate::error::{InventoryError, Result};
use crate::models::ItemId;
use std::io::{BufRead, Write};

/// Parses an item id (whole number, may be negative).
pub fn parse_id(input: &str) -> Result<ItemId> {
    let trimmed = input.trim();
    trimmed
        .parse::<ItemId>()
        .map_err(|_| InventoryError::input_shape("ID", trimmed, "expected a whole number"))
}

/// Parses a stock quantity (whole number, zero or more).
pub fn parse_quantity(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') && trimmed[1..].parse::<u64>().is_ok() {
        return Err(InventoryError::input_shape(
            "quantity",
            trimmed,
            "quantity cannot be negative",
        ));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| InventoryError::input_shape("quantity", trimmed, "expected a whole number"))
}

/// Trims an item name, rejecting blank input.
pub fn parse_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::input_shape("name", trimmed, "name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Reads answers from `reader`, writing prompts and complaints to `writer`.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prints `prompt` and returns the next line without its line ending.
    ///
    /// Returns [`InventoryError::InputClosed`] at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InventoryError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompts until `parse` accepts the answer.
    ///
    /// Input-shape errors are shown and the prompt repeats; any other error
    /// is returned.
    pub fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e @ InventoryError::InputShape { .. }) => {
                    log::debug!("Rejected input: {}", e);
                    writeln!(self.writer, "{e}. Please try again.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn ask_id(&mut self, prompt: &str) -> Result<ItemId> {
        self.ask(prompt, parse_id)
    }

    pub fn ask_quantity(&mut self, prompt: &str) -> Result<u32> {
        self.ask(prompt, parse_quantity)
    }

    pub fn ask_name(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt, parse_name)
    }

    /// Writes a full line of output.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        Ok(())
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
