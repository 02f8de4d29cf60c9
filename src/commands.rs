//! CLI commands
//!
//! The `quote` and `options` commands, writing to any output so the binary
//! stays a thin wrapper.

use std::io;

use tabled::{builder::Builder, settings::Style};
use thiserror::Error;
use tracing::info;

use crate::{
    calculator::{FormError, QuoteForm},
    catalog::PriceCatalog,
    config::quote::{OutputFormat, QuoteArgs},
    form::FormDataError,
    html::HtmlView,
    options::Category,
    pricing::format_currency,
    receipt::ReceiptError,
    selection::{Selection, SelectionError},
};

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `--form` could not be parsed.
    #[error(transparent)]
    FormData(#[from] FormDataError),

    /// The form data did not describe a valid selection.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The selection was rejected by the form.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The table could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Output error
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Price the cake described by `args` and write it in the requested format.
///
/// Fillings go through [`QuoteForm`] so the two-filling limit applies.
///
/// # Errors
///
/// Returns an error if the form data is invalid, an option is unknown or
/// disabled, or the output cannot be written.
pub fn quote(
    catalog: &PriceCatalog,
    args: &QuoteArgs,
    mut out: impl io::Write,
) -> Result<(), CommandError> {
    let data = args.form_data()?;
    let selection = Selection::try_from(&data)?;

    info!(?selection, "quoting");

    let mut view = HtmlView::new();

    let quote = {
        let mut form = QuoteForm::new(catalog, selection)?;
        form.subscribe(|quote| view.update(quote));
        form.mount()?.clone()
    };

    match args.output {
        OutputFormat::Table => quote.write_to(&mut out)?,
        OutputFormat::Html => write!(out, "{}", view.to_fragment())?,
    }

    Ok(())
}

/// List every option and its price.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn options(catalog: &PriceCatalog, mut out: impl io::Write) -> Result<(), CommandError> {
    let mut builder = Builder::default();

    builder.push_record(["Field", "Option", "Label", "Price"]);

    for category in Category::ALL {
        for (id, price) in catalog.table(category).entries() {
            builder.push_record([
                category.field_name().to_string(),
                id.to_string(),
                id.label(),
                format_currency(price),
            ]);
        }
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: QuoteArgs,
    }

    fn run_quote(argv: &[&str]) -> Result<String, CommandError> {
        let cli = TestCli::parse_from(argv);
        let mut out = Vec::new();

        quote(&PriceCatalog::default(), &cli.args, &mut out)?;

        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn html_output_has_breakdown_and_total() -> TestResult {
        let html = run_quote(&[
            "test",
            "--output",
            "html",
            "--form",
            "size=20&bizcocho=chocolate&relleno=manjar&relleno=crema-pastelera&cobertura=fondant&extra=flores",
        ])?;

        assert_eq!(html.matches(r#"class="price-item""#).count(), 8);
        assert!(html.contains(r#"<p id="final-price">$45.500</p>"#));

        Ok(())
    }

    #[test]
    fn table_output_has_total() -> TestResult {
        let table = run_quote(&["test", "--size", "40", "--bizcocho", "zanahoria"])?;

        assert!(table.contains("$49.500"));

        Ok(())
    }

    #[test]
    fn third_filling_is_rejected() {
        let result = run_quote(&[
            "test",
            "--relleno",
            "manjar",
            "--relleno",
            "crema-pastelera",
            "--relleno",
            "crema-lucuma",
        ]);

        assert!(matches!(
            result,
            Err(CommandError::Form(FormError::Disabled(_)))
        ));
    }

    #[test]
    fn repeated_extra_is_rejected() {
        let result = run_quote(&["test", "--extra", "flores", "--extra", "flores"]);

        assert!(matches!(
            result,
            Err(CommandError::Selection(SelectionError::Duplicate { field: "extra", .. }))
        ));
    }

    #[test]
    fn options_lists_every_table() -> TestResult {
        let mut out = Vec::new();

        options(&PriceCatalog::default(), &mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("red velvet"));
        assert!(text.contains("$45.000"));
        assert!(text.contains("cobertura"));

        Ok(())
    }
}
