//! Cake Quote prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::{FormError, Observer, QuoteForm},
    catalog::{CatalogError, PriceCatalog, PriceTable},
    fillings::{Checkbox, FillingGroup, MAX_FILLINGS, enforce_filling_limit},
    fixtures::{FixtureError, catalog_from_str, load_catalog},
    form::{FormData, FormDataError},
    html::HtmlView,
    options::{Category, OptionId},
    pricing::{Amount, format_currency, pesos},
    quote::{LineItem, Quote, QuoteError, calculate, calculate_form},
    receipt::ReceiptError,
    selection::{Selection, SelectionError},
};
