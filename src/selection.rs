//! Selection
//!
//! The chosen option identifiers, derived from the form on every calculation.

use smallvec::{Array, SmallVec};
use thiserror::Error;

use crate::{
    form::FormData,
    options::{Category, OptionId},
};

/// Errors building a selection from form data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A single-select field has no value
    #[error("Missing value for field '{0}'")]
    MissingField(&'static str),

    /// A multi-select field lists the same option more than once
    #[error("Option '{id}' is selected more than once in field '{field}'")]
    Duplicate {
        /// Form field holding the repeated value
        field: &'static str,
        /// Repeated option identifier
        id: OptionId,
    },
}

/// Current option choices for one cake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Size identifier, e.g. `20`
    pub size: OptionId,

    /// Sponge flavour
    pub sponge: OptionId,

    /// Fillings in selection order
    pub fillings: SmallVec<[OptionId; 2]>,

    /// Frosting
    pub frosting: OptionId,

    /// Extras in selection order
    pub extras: SmallVec<[OptionId; 4]>,
}

impl Selection {
    /// Create a selection with no fillings or extras.
    pub fn new(
        size: impl Into<OptionId>,
        sponge: impl Into<OptionId>,
        frosting: impl Into<OptionId>,
    ) -> Self {
        Self {
            size: size.into(),
            sponge: sponge.into(),
            fillings: SmallVec::new(),
            frosting: frosting.into(),
            extras: SmallVec::new(),
        }
    }

    /// Replace the fillings.
    #[must_use]
    pub fn with_fillings<I, T>(mut self, fillings: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OptionId>,
    {
        self.fillings = fillings.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the extras.
    #[must_use]
    pub fn with_extras<I, T>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OptionId>,
    {
        self.extras = extras.into_iter().map(Into::into).collect();
        self
    }

    /// Check that no filling or extra is listed twice.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Duplicate`] naming the first repeated option.
    pub fn check_unique(&self) -> Result<(), SelectionError> {
        unique(Category::Filling, &self.fillings)?;
        unique(Category::Extra, &self.extras)
    }
}

fn unique(category: Category, ids: &[OptionId]) -> Result<(), SelectionError> {
    for (idx, id) in ids.iter().enumerate() {
        if ids.iter().take(idx).any(|earlier| earlier == id) {
            return Err(SelectionError::Duplicate {
                field: category.field_name(),
                id: id.clone(),
            });
        }
    }

    Ok(())
}

fn single(data: &FormData, category: Category) -> Result<OptionId, SelectionError> {
    let field = category.field_name();

    data.get(field)
        .filter(|value| !value.is_empty())
        .map(OptionId::from)
        .ok_or(SelectionError::MissingField(field))
}

fn multi<A: Array<Item = OptionId>>(data: &FormData, category: Category) -> SmallVec<A> {
    data.get_all(category.field_name())
        .into_iter()
        .filter(|value| !value.is_empty())
        .map(OptionId::from)
        .collect()
}

impl TryFrom<&FormData> for Selection {
    type Error = SelectionError;

    fn try_from(data: &FormData) -> Result<Self, Self::Error> {
        let selection = Self {
            size: single(data, Category::Size)?,
            sponge: single(data, Category::Sponge)?,
            fillings: multi(data, Category::Filling),
            frosting: single(data, Category::Frosting)?,
            extras: multi(data, Category::Extra),
        };

        selection.check_unique()?;

        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn reads_every_field() -> TestResult {
        let data = FormData::parse(
            "size=20&bizcocho=chocolate&relleno=manjar&relleno=crema-pastelera&cobertura=fondant&extra=flores",
        )?;

        let selection = Selection::try_from(&data)?;

        assert_eq!(
            selection,
            Selection::new("20", "chocolate", "fondant")
                .with_fillings(["manjar", "crema-pastelera"])
                .with_extras(["flores"])
        );

        Ok(())
    }

    #[test]
    fn multi_select_fields_may_be_absent() -> TestResult {
        let data = FormData::parse("size=10&bizcocho=vainilla&cobertura=merengue")?;

        let selection = Selection::try_from(&data)?;

        assert!(selection.fillings.is_empty());
        assert!(selection.extras.is_empty());

        Ok(())
    }

    #[test]
    fn missing_size_is_an_error() -> TestResult {
        let data = FormData::parse("bizcocho=vainilla&cobertura=merengue")?;

        assert_eq!(
            Selection::try_from(&data),
            Err(SelectionError::MissingField("size"))
        );

        Ok(())
    }

    #[test]
    fn empty_frosting_is_an_error() -> TestResult {
        let data = FormData::parse("size=10&bizcocho=vainilla&cobertura=")?;

        assert_eq!(
            Selection::try_from(&data),
            Err(SelectionError::MissingField("cobertura"))
        );

        Ok(())
    }

    #[test]
    fn repeated_extra_is_an_error() -> TestResult {
        let data = FormData::parse(
            "size=10&bizcocho=vainilla&cobertura=merengue&extra=flores&extra=frutas&extra=flores",
        )?;

        assert_eq!(
            Selection::try_from(&data),
            Err(SelectionError::Duplicate {
                field: "extra",
                id: OptionId::from("flores"),
            })
        );

        Ok(())
    }

    #[test]
    fn check_unique_catches_repeated_fillings() {
        let selection =
            Selection::new("10", "vainilla", "merengue").with_fillings(["manjar", "manjar"]);

        assert_eq!(
            selection.check_unique(),
            Err(SelectionError::Duplicate {
                field: "relleno",
                id: OptionId::from("manjar"),
            })
        );
    }

    #[test]
    fn check_unique_accepts_distinct_options() {
        let selection = Selection::new("10", "vainilla", "merengue")
            .with_fillings(["manjar", "crema-lucuma"])
            .with_extras(["flores", "frutas"]);

        assert_eq!(selection.check_unique(), Ok(()));
    }
}
