//! Options

use std::{borrow::Borrow, fmt};

/// Option category, one per price table and form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Cake size (number of servings)
    Size,

    /// Sponge flavour (bizcocho)
    Sponge,

    /// Filling between tiers (relleno)
    Filling,

    /// Exterior covering (cobertura)
    Frosting,

    /// Optional add-on decoration
    Extra,
}

impl Category {
    /// All categories, in breakdown order.
    pub const ALL: [Category; 5] = [
        Category::Size,
        Category::Sponge,
        Category::Filling,
        Category::Frosting,
        Category::Extra,
    ];

    /// Name of the form field carrying this category's value(s).
    pub fn field_name(self) -> &'static str {
        match self {
            Category::Size => "size",
            Category::Sponge => "bizcocho",
            Category::Filling => "relleno",
            Category::Frosting => "cobertura",
            Category::Extra => "extra",
        }
    }

    /// Whether more than one option of this category can be selected.
    pub fn is_multi_select(self) -> bool {
        matches!(self, Category::Filling | Category::Extra)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Option identifier as it appears in the form markup, e.g. `red-velvet`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(String);

impl OptionId {
    /// Create a new option identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display text for the identifier: hyphen-separated words become space-separated.
    pub fn label(&self) -> String {
        self.0.replace('-', " ")
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OptionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for OptionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
