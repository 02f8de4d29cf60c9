//! Receipt
//!
//! Terminal rendering of a [`Quote`] as a table followed by the total.

use std::{fmt::Write as _, io};

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::quote::{LineItem, Quote};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

impl Quote {
    /// Prints the quote breakdown and total.
    ///
    /// Group headers are bold and have an empty cost cell; nested items are
    /// indented under them.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Costo"]);

        let mut header_rows = Vec::new();

        for (idx, line) in self.breakdown().iter().enumerate() {
            if line.is_header() {
                header_rows.push(idx + 1); // table header is row 0
            }

            builder.push_record([line_label(line), line.formatted_cost()]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..2), Alignment::right());

        for row in header_rows {
            table.modify((row, 0), Color::BOLD);
        }

        let table_str = colorize_borders(&table.to_string());

        writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)?;

        writeln!(
            out,
            " \x1b[1mTotal:\x1b[0m  \x1b[1m{}\x1b[0m\n",
            self.formatted_total()
        )
        .map_err(|_err| ReceiptError::IO)
    }
}

fn line_label(line: &LineItem) -> String {
    if line.is_indented() {
        format!("  {}", line.label())
    } else {
        line.label().to_string()
    }
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F.
/// Matches the grey border styling of receipt tables.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
