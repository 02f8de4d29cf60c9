//! Price calculator form
//!
//! [`QuoteForm`] holds the current form state and re-runs the calculation on
//! every change. Registered observers are called synchronously with the fresh
//! quote, which always replaces the previous one in full.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    catalog::{CatalogError, PriceCatalog},
    fillings::FillingGroup,
    options::{Category, OptionId},
    quote::{Quote, QuoteError, calculate},
    selection::{Selection, SelectionError},
};

/// Errors raised by form changes.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    /// The option is not offered in its category.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The filling checkbox is disabled because the limit has been reached.
    #[error("Filling '{0}' is disabled; uncheck another filling first")]
    Disabled(OptionId),

    /// The initial selection repeats a filling or extra.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Recalculation failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Callback invoked with each recalculated quote.
pub type Observer<'a> = Box<dyn FnMut(&Quote) + 'a>;

/// Form state plus the observers that render it.
pub struct QuoteForm<'a> {
    catalog: &'a PriceCatalog,
    size: OptionId,
    sponge: OptionId,
    frosting: OptionId,
    fillings: FillingGroup,
    filling_order: SmallVec<[OptionId; 2]>,
    extras: SmallVec<[OptionId; 4]>,
    observers: Vec<Observer<'a>>,
    current: Option<Quote>,
}

impl fmt::Debug for QuoteForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteForm")
            .field("size", &self.size)
            .field("sponge", &self.sponge)
            .field("frosting", &self.frosting)
            .field("fillings", &self.fillings)
            .field("filling_order", &self.filling_order)
            .field("extras", &self.extras)
            .field("observers", &self.observers.len())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<'a> QuoteForm<'a> {
    /// Create a form with an initial selection.
    ///
    /// The filling group offers every option of the catalog's filling table.
    /// No calculation runs until [`QuoteForm::mount`] or a change.
    ///
    /// # Errors
    ///
    /// Returns an error if an initial option is not in the catalog or is
    /// repeated, or if the initial fillings exceed the limit.
    pub fn new(catalog: &'a PriceCatalog, initial: Selection) -> Result<Self, FormError> {
        initial.check_unique()?;

        let filling_ids = catalog
            .table(Category::Filling)
            .entries()
            .into_iter()
            .map(|(id, _)| id.clone());

        let mut form = Self {
            catalog,
            size: checked_option(catalog, Category::Size, initial.size)?,
            sponge: checked_option(catalog, Category::Sponge, initial.sponge)?,
            frosting: checked_option(catalog, Category::Frosting, initial.frosting)?,
            fillings: FillingGroup::new(filling_ids),
            filling_order: SmallVec::new(),
            extras: SmallVec::new(),
            observers: Vec::new(),
            current: None,
        };

        for filling in initial.fillings {
            form.flip_filling(filling)?;
        }

        for extra in initial.extras {
            form.flip_extra(extra)?;
        }

        Ok(form)
    }

    /// Register an observer, called after every recalculation.
    pub fn subscribe(&mut self, observer: impl FnMut(&Quote) + 'a) {
        self.observers.push(Box::new(observer));
    }

    /// Initial load: apply the filling limit, then calculate and notify.
    ///
    /// # Errors
    ///
    /// Returns an error if the calculation fails.
    pub fn mount(&mut self) -> Result<&Quote, FormError> {
        info!(observers = self.observers.len(), "mounting quote form");

        self.changed(true)
    }

    /// Choose a size.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not offered.
    pub fn select_size(&mut self, id: impl Into<OptionId>) -> Result<&Quote, FormError> {
        self.size = checked_option(self.catalog, Category::Size, id.into())?;
        self.changed(false)
    }

    /// Choose a sponge flavour.
    ///
    /// # Errors
    ///
    /// Returns an error if the sponge is not offered.
    pub fn select_sponge(&mut self, id: impl Into<OptionId>) -> Result<&Quote, FormError> {
        self.sponge = checked_option(self.catalog, Category::Sponge, id.into())?;
        self.changed(false)
    }

    /// Choose a frosting.
    ///
    /// # Errors
    ///
    /// Returns an error if the frosting is not offered.
    pub fn select_frosting(&mut self, id: impl Into<OptionId>) -> Result<&Quote, FormError> {
        self.frosting = checked_option(self.catalog, Category::Frosting, id.into())?;
        self.changed(false)
    }

    /// Check or uncheck a filling.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Disabled`] when checking a filling while the limit
    /// is reached, or [`FormError::Catalog`] for an unknown filling.
    pub fn toggle_filling(&mut self, id: impl Into<OptionId>) -> Result<&Quote, FormError> {
        self.flip_filling(id.into())?;
        self.changed(true)
    }

    /// Check or uncheck an extra.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Catalog`] for an unknown extra.
    pub fn toggle_extra(&mut self, id: impl Into<OptionId>) -> Result<&Quote, FormError> {
        self.flip_extra(id.into())?;
        self.changed(false)
    }

    /// Current selection, fillings and extras in the order they were checked.
    pub fn selection(&self) -> Selection {
        Selection {
            size: self.size.clone(),
            sponge: self.sponge.clone(),
            fillings: self.filling_order.clone(),
            frosting: self.frosting.clone(),
            extras: self.extras.clone(),
        }
    }

    /// Filling checkbox states.
    pub fn fillings(&self) -> &FillingGroup {
        &self.fillings
    }

    /// Most recently calculated quote.
    pub fn quote(&self) -> Option<&Quote> {
        self.current.as_ref()
    }

    fn flip_filling(&mut self, id: OptionId) -> Result<(), FormError> {
        let (checked, disabled) = self
            .fillings
            .checkbox(id.as_str())
            .map(|checkbox| (checkbox.is_checked(), checkbox.is_disabled()))
            .ok_or_else(|| CatalogError::UnknownOption {
                category: Category::Filling,
                id: id.to_string(),
            })?;

        if checked {
            self.fillings.set_checked(id.as_str(), false);
            self.filling_order.retain(|selected| *selected != id);
        } else if disabled {
            return Err(FormError::Disabled(id));
        } else {
            self.fillings.set_checked(id.as_str(), true);
            self.filling_order.push(id);
            self.fillings.enforce_limit();
        }

        Ok(())
    }

    fn flip_extra(&mut self, id: OptionId) -> Result<(), FormError> {
        let id = checked_option(self.catalog, Category::Extra, id)?;

        if let Some(position) = self.extras.iter().position(|extra| *extra == id) {
            self.extras.remove(position);
        } else {
            self.extras.push(id);
        }

        Ok(())
    }

    /// A change event: the filling limit runs first when the filling group changed,
    /// then the quote is recalculated and every observer notified.
    fn changed(&mut self, fillings_changed: bool) -> Result<&Quote, FormError> {
        if fillings_changed {
            self.fillings.enforce_limit();
        }

        let quote = calculate(self.catalog, &self.selection())?;

        debug!(total = %quote.formatted_total(), "form changed");

        for observer in &mut self.observers {
            observer(&quote);
        }

        Ok(&*self.current.insert(quote))
    }
}

fn checked_option(
    catalog: &PriceCatalog,
    category: Category,
    id: OptionId,
) -> Result<OptionId, CatalogError> {
    if catalog.table(category).contains(id.as_str()) {
        Ok(id)
    } else {
        Err(CatalogError::UnknownOption {
            category,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use testresult::TestResult;

    use crate::pricing::pesos;

    use super::*;

    fn base() -> Selection {
        Selection::new("10", "vainilla", "merengue")
    }

    #[test]
    fn mount_calculates_and_notifies() -> TestResult {
        let catalog = PriceCatalog::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut form = QuoteForm::new(&catalog, base())?;
        form.subscribe(move |quote| sink.borrow_mut().push(quote.total()));

        assert!(form.quote().is_none());

        form.mount()?;

        assert_eq!(*seen.borrow(), [pesos(16_500)]);

        Ok(())
    }

    #[test]
    fn every_change_notifies_with_a_fresh_quote() -> TestResult {
        let catalog = PriceCatalog::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut form = QuoteForm::new(&catalog, base())?;
        form.subscribe(move |quote| sink.borrow_mut().push(quote.breakdown().len()));
        form.mount()?;

        form.toggle_extra("flores")?;
        form.toggle_extra("flores")?;

        assert_eq!(*seen.borrow(), [2, 4, 2]);

        Ok(())
    }

    #[test]
    fn third_filling_is_rejected_until_one_is_unchecked() -> TestResult {
        let catalog = PriceCatalog::default();
        let mut form = QuoteForm::new(&catalog, base())?;
        form.mount()?;

        form.toggle_filling("manjar")?;
        form.toggle_filling("crema-pastelera")?;

        assert_eq!(
            form.toggle_filling("crema-lucuma").map(Quote::total),
            Err(FormError::Disabled(OptionId::from("crema-lucuma")))
        );
        assert!(form.fillings().checkbox("crema-lucuma").is_some_and(|cb| cb.is_disabled()));
        assert!(form.fillings().checkbox("manjar").is_some_and(|cb| !cb.is_disabled()));

        form.toggle_filling("manjar")?;
        let quote = form.toggle_filling("crema-lucuma")?;

        assert_eq!(quote.total(), pesos(16_500 + 2_000 + 4_000));
        assert_eq!(
            form.selection().fillings.as_slice(),
            [OptionId::from("crema-pastelera"), OptionId::from("crema-lucuma")]
        );

        Ok(())
    }

    #[test]
    fn initial_fillings_are_limited() -> TestResult {
        let catalog = PriceCatalog::default();
        let initial = base().with_fillings(["manjar", "crema-pastelera"]);

        let form = QuoteForm::new(&catalog, initial)?;

        assert_eq!(form.fillings().checked_count(), 2);
        assert_eq!(
            form.fillings()
                .checkboxes()
                .iter()
                .filter(|cb| cb.is_disabled())
                .count(),
            3
        );

        Ok(())
    }

    #[test]
    fn too_many_initial_fillings_is_an_error() {
        let catalog = PriceCatalog::default();
        let initial = base().with_fillings(["manjar", "crema-pastelera", "crema-lucuma"]);

        assert!(matches!(
            QuoteForm::new(&catalog, initial),
            Err(FormError::Disabled(id)) if id.as_str() == "crema-lucuma"
        ));
    }

    #[test]
    fn repeated_initial_options_are_rejected() {
        let catalog = PriceCatalog::default();

        let extras = base().with_extras(["flores", "flores"]);
        let fillings = base().with_fillings(["manjar", "manjar"]);

        assert!(matches!(
            QuoteForm::new(&catalog, extras),
            Err(FormError::Selection(SelectionError::Duplicate { field: "extra", .. }))
        ));
        assert!(matches!(
            QuoteForm::new(&catalog, fillings),
            Err(FormError::Selection(SelectionError::Duplicate { field: "relleno", .. }))
        ));
    }

    #[test]
    fn unknown_options_leave_state_untouched() -> TestResult {
        let catalog = PriceCatalog::default();
        let mut form = QuoteForm::new(&catalog, base())?;
        form.mount()?;

        assert!(matches!(form.select_size("15"), Err(FormError::Catalog(_))));
        assert!(matches!(form.toggle_extra("velas"), Err(FormError::Catalog(_))));
        assert!(matches!(form.toggle_filling("chirimoya"), Err(FormError::Catalog(_))));

        assert_eq!(form.selection(), base());

        Ok(())
    }

    #[test]
    fn single_select_changes_replace_previous_value() -> TestResult {
        let catalog = PriceCatalog::default();
        let mut form = QuoteForm::new(&catalog, base())?;

        form.select_size("40")?;
        form.select_sponge("zanahoria")?;
        let quote = form.select_frosting("ganache")?;

        assert_eq!(quote.total(), pesos(45_000 + 3_000 + 5_000));

        Ok(())
    }

    #[test]
    fn recalculation_is_idempotent() -> TestResult {
        let catalog = PriceCatalog::default();
        let initial = base().with_fillings(["manjar"]).with_extras(["frutas"]);
        let mut form = QuoteForm::new(&catalog, initial)?;

        let first = form.mount()?.clone();
        let second = form.mount()?.clone();

        assert_eq!(first, second);

        Ok(())
    }
}
