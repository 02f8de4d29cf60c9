//! Quote
//!
//! [`calculate`] turns a [`Selection`] into a [`Quote`]: an ordered breakdown
//! of line items plus the total. Every call rebuilds the breakdown from
//! scratch, so a quote never carries lines from a previous selection.

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CatalogError, PriceCatalog},
    form::FormData,
    options::{Category, OptionId},
    pricing::{Amount, TotalPriceError, format_currency, total_price},
    selection::{Selection, SelectionError},
};

/// Errors that can occur while calculating a quote.
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    /// A selected option is missing from its price table.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The form data did not describe a complete selection.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Error summing line item costs.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// One row of the breakdown: either a priced entry or a group header.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    label: String,
    cost: Option<Amount>,
    indented: bool,
}

impl LineItem {
    /// A top-level priced entry.
    pub fn priced(label: impl Into<String>, cost: Amount) -> Self {
        Self {
            label: label.into(),
            cost: Some(cost),
            indented: false,
        }
    }

    /// A priced entry nested under a group header.
    pub fn nested(label: impl Into<String>, cost: Amount) -> Self {
        Self {
            label: label.into(),
            cost: Some(cost),
            indented: true,
        }
    }

    /// A group header; headers never carry a cost.
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cost: None,
            indented: false,
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cost, or `None` for a group header.
    pub fn cost(&self) -> Option<&Amount> {
        self.cost.as_ref()
    }

    /// Whether this line is a group header.
    pub fn is_header(&self) -> bool {
        self.cost.is_none()
    }

    /// Whether this line is nested under a group header.
    pub fn is_indented(&self) -> bool {
        self.indented
    }

    /// Formatted cost; empty for headers.
    pub fn formatted_cost(&self) -> String {
        self.cost.as_ref().map(format_currency).unwrap_or_default()
    }
}

/// Price breakdown and total for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    breakdown: Vec<LineItem>,
    total: Amount,
}

impl Quote {
    /// Build a quote from its breakdown; the total is the sum of the line costs.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::TotalPrice`] if the line costs cannot be summed.
    pub fn from_breakdown(breakdown: Vec<LineItem>) -> Result<Self, QuoteError> {
        let total = total_price(breakdown.iter().filter_map(LineItem::cost))?;

        Ok(Self { breakdown, total })
    }

    /// Line items, in display order.
    pub fn breakdown(&self) -> &[LineItem] {
        &self.breakdown
    }

    /// Sum of every selected cost.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Total formatted as currency.
    pub fn formatted_total(&self) -> String {
        format_currency(&self.total)
    }
}

/// Calculate the quote for a selection.
///
/// Order: size, sponge (omitted when free), fillings, frosting, extras. Filling
/// and extra groups get a header line only when at least one item is selected.
///
/// # Errors
///
/// Returns [`QuoteError::Catalog`] if any selected identifier has no price, or
/// [`QuoteError::Selection`] if a filling or extra is listed twice.
pub fn calculate(catalog: &PriceCatalog, selection: &Selection) -> Result<Quote, QuoteError> {
    selection.check_unique()?;

    let mut breakdown = Vec::with_capacity(
        4 + selection.fillings.len() + selection.extras.len(),
    );

    let size_cost = catalog.price(Category::Size, selection.size.as_str())?;
    breakdown.push(LineItem::priced(
        format!("Costo Base ({} pers.)", selection.size),
        size_cost,
    ));

    let sponge_cost = catalog.price(Category::Sponge, selection.sponge.as_str())?;
    if sponge_cost.is_positive() {
        breakdown.push(LineItem::priced(
            format!("Bizcocho de {}", selection.sponge.label()),
            sponge_cost,
        ));
    }

    push_group(
        &mut breakdown,
        catalog,
        Category::Filling,
        "Rellenos:",
        &selection.fillings,
    )?;

    let frosting_cost = catalog.price(Category::Frosting, selection.frosting.as_str())?;
    breakdown.push(LineItem::priced(
        format!("Cobertura de {}", selection.frosting.label()),
        frosting_cost,
    ));

    push_group(
        &mut breakdown,
        catalog,
        Category::Extra,
        "Extras:",
        &selection.extras,
    )?;

    let quote = Quote::from_breakdown(breakdown)?;

    debug!(
        lines = quote.breakdown.len(),
        total = %quote.formatted_total(),
        "calculated quote"
    );

    Ok(quote)
}

/// Calculate the quote for raw form data.
///
/// # Errors
///
/// Returns [`QuoteError::Selection`] if a single-select field is missing, or
/// [`QuoteError::Catalog`] if an identifier has no price.
pub fn calculate_form(catalog: &PriceCatalog, data: &FormData) -> Result<Quote, QuoteError> {
    let selection = Selection::try_from(data)?;

    calculate(catalog, &selection)
}

fn push_group(
    breakdown: &mut Vec<LineItem>,
    catalog: &PriceCatalog,
    category: Category,
    header: &str,
    ids: &[OptionId],
) -> Result<(), QuoteError> {
    if ids.is_empty() {
        return Ok(());
    }

    breakdown.push(LineItem::header(header));

    for id in ids {
        let cost = catalog.price(category, id.as_str())?;
        breakdown.push(LineItem::nested(format!("- {}", id.label()), cost));
    }

    Ok(())
}
