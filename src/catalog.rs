//! Price catalog
//!
//! Five independent price tables, one per [`Category`]. Tables are built once
//! and never mutated afterwards.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    options::{Category, OptionId},
    pricing::{Amount, pesos},
};

/// Errors raised by price table lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A selected option has no entry in its price table (form/table drift).
    #[error("no {category} price for option '{id}'")]
    UnknownOption {
        /// Category of the table that was searched
        category: Category,
        /// Identifier that was not found
        id: String,
    },
}

/// Fixed mapping from option identifier to price for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    category: Category,
    prices: FxHashMap<OptionId, Amount>,
}

impl PriceTable {
    /// Create a table from `(identifier, whole pesos)` pairs.
    pub fn new<I, K>(category: Category, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<OptionId>,
    {
        let prices = entries
            .into_iter()
            .map(|(id, price)| (id.into(), pesos(i64::from(price))))
            .collect();

        Self { category, prices }
    }

    /// Category this table prices.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Look up the price of an option.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownOption`] if the option is not in the table.
    pub fn price(&self, id: &str) -> Result<Amount, CatalogError> {
        self.prices
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::UnknownOption {
                category: self.category,
                id: id.to_string(),
            })
    }

    /// Whether the table has an entry for the option.
    pub fn contains(&self, id: &str) -> bool {
        self.prices.contains_key(id)
    }

    /// Entries sorted by price, then identifier.
    pub fn entries(&self) -> Vec<(&OptionId, &Amount)> {
        let mut entries: Vec<_> = self.prices.iter().collect();

        entries.sort_by(|(a_id, a_price), (b_id, b_price)| {
            a_price
                .amount()
                .cmp(b_price.amount())
                .then_with(|| a_id.cmp(b_id))
        });

        entries
    }

    /// Number of options in the table.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the table has no options.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// The five price tables a quote is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCatalog {
    size: PriceTable,
    sponge: PriceTable,
    filling: PriceTable,
    frosting: PriceTable,
    extra: PriceTable,
}

impl PriceCatalog {
    /// Build a catalog from its five tables.
    ///
    /// Each table must carry the category it is being used for; see [`PriceTable::category`].
    pub fn new(
        size: PriceTable,
        sponge: PriceTable,
        filling: PriceTable,
        frosting: PriceTable,
        extra: PriceTable,
    ) -> Self {
        Self {
            size,
            sponge,
            filling,
            frosting,
            extra,
        }
    }

    /// The price table for a category.
    pub fn table(&self, category: Category) -> &PriceTable {
        match category {
            Category::Size => &self.size,
            Category::Sponge => &self.sponge,
            Category::Filling => &self.filling,
            Category::Frosting => &self.frosting,
            Category::Extra => &self.extra,
        }
    }

    /// Look up the price of an option in a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownOption`] if the option is not priced.
    pub fn price(&self, category: Category, id: &str) -> Result<Amount, CatalogError> {
        self.table(category).price(id)
    }
}

impl Default for PriceCatalog {
    /// Estimated prices in CLP.
    ///
    /// Size prices include base ingredients, labour and fixed costs.
    fn default() -> Self {
        Self {
            size: PriceTable::new(
                Category::Size,
                [("10", 15_000), ("20", 25_000), ("30", 35_000), ("40", 45_000)],
            ),
            sponge: PriceTable::new(
                Category::Sponge,
                [
                    ("vainilla", 0),
                    ("chocolate", 2_000),
                    ("red-velvet", 3_500),
                    ("zanahoria", 3_000),
                ],
            ),
            filling: PriceTable::new(
                Category::Filling,
                [
                    ("manjar", 2_500),
                    ("crema-pastelera", 2_000),
                    ("mermelada-frutilla", 1_500),
                    ("mousse-chocolate", 3_500),
                    ("crema-lucuma", 4_000),
                ],
            ),
            frosting: PriceTable::new(
                Category::Frosting,
                [
                    ("merengue", 1_500),
                    ("buttercream", 3_000),
                    ("ganache", 5_000),
                    ("fondant", 8_000),
                ],
            ),
            extra: PriceTable::new(
                Category::Extra,
                [
                    ("frutas", 4_500),
                    ("drip-cake", 3_000),
                    ("flores", 6_000),
                    ("figura-fondant", 7_000),
                ],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_catalog_prices_every_category() -> TestResult {
        let catalog = PriceCatalog::default();

        assert_eq!(catalog.price(Category::Size, "20")?, pesos(25_000));
        assert_eq!(catalog.price(Category::Sponge, "vainilla")?, pesos(0));
        assert_eq!(catalog.price(Category::Filling, "crema-lucuma")?, pesos(4_000));
        assert_eq!(catalog.price(Category::Frosting, "fondant")?, pesos(8_000));
        assert_eq!(catalog.price(Category::Extra, "drip-cake")?, pesos(3_000));

        Ok(())
    }

    #[test]
    fn tables_know_their_category() {
        let catalog = PriceCatalog::default();

        for category in Category::ALL {
            assert_eq!(catalog.table(category).category(), category);
        }
    }

    #[test]
    fn unknown_option_is_an_error() {
        let catalog = PriceCatalog::default();

        assert_eq!(
            catalog.price(Category::Frosting, "chantilly"),
            Err(CatalogError::UnknownOption {
                category: Category::Frosting,
                id: "chantilly".to_string(),
            })
        );
    }

    #[test]
    fn unknown_option_message_names_category_and_id() {
        let err = CatalogError::UnknownOption {
            category: Category::Sponge,
            id: "limon".to_string(),
        };

        assert_eq!(err.to_string(), "no bizcocho price for option 'limon'");
    }

    #[test]
    fn entries_are_sorted_by_price_then_id() {
        let table = PriceTable::new(Category::Extra, [("b", 10), ("a", 10), ("c", 5)]);

        let ids: Vec<&str> = table.entries().iter().map(|(id, _)| id.as_str()).collect();

        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn len_and_is_empty() {
        let empty = PriceTable::new::<[(&str, u32); 0], &str>(Category::Extra, []);

        assert!(empty.is_empty());
        assert_eq!(PriceCatalog::default().table(Category::Filling).len(), 5);
    }
}
