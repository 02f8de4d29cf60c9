//! Fixtures
//!
//! Loads a [`PriceCatalog`] from YAML. The document has one mapping per form
//! field, each mapping option identifiers to whole-peso prices:
//!
//! ```yaml
//! size: { 10: 15000, 20: 25000 }
//! bizcocho: { vainilla: 0, chocolate: 2000 }
//! relleno: { manjar: 2500 }
//! cobertura: { merengue: 1500 }
//! extra: { flores: 6000 }
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{PriceCatalog, PriceTable},
    options::Category,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A table defines no options, so nothing in that category could be selected
    #[error("Price table '{0}' has no options")]
    EmptyTable(Category),

    /// Two keys name the same option once read as text, e.g. `10` and `'10'`
    #[error("Price table '{category}' lists option '{id}' more than once")]
    DuplicateOption {
        /// Table holding the repeated key
        category: Category,
        /// Option identifier
        id: String,
    },
}

/// Option key as written in YAML; sizes are usually bare numbers.
#[derive(Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
enum OptionKey {
    Number(u64),
    Text(String),
}

impl From<OptionKey> for String {
    fn from(key: OptionKey) -> Self {
        match key {
            OptionKey::Number(number) => number.to_string(),
            OptionKey::Text(text) => text,
        }
    }
}

/// Catalog fixture, keyed by form field name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFixture {
    size: FxHashMap<OptionKey, u32>,
    bizcocho: FxHashMap<OptionKey, u32>,
    relleno: FxHashMap<OptionKey, u32>,
    cobertura: FxHashMap<OptionKey, u32>,
    extra: FxHashMap<OptionKey, u32>,
}

fn table(
    category: Category,
    entries: FxHashMap<OptionKey, u32>,
) -> Result<PriceTable, FixtureError> {
    if entries.is_empty() {
        return Err(FixtureError::EmptyTable(category));
    }

    let mut prices = FxHashMap::default();

    for (key, price) in entries {
        let id = String::from(key);

        if prices.contains_key(&id) {
            return Err(FixtureError::DuplicateOption { category, id });
        }

        prices.insert(id, price);
    }

    Ok(PriceTable::new(category, prices))
}

impl TryFrom<CatalogFixture> for PriceCatalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        Ok(PriceCatalog::new(
            table(Category::Size, fixture.size)?,
            table(Category::Sponge, fixture.bizcocho)?,
            table(Category::Filling, fixture.relleno)?,
            table(Category::Frosting, fixture.cobertura)?,
            table(Category::Extra, fixture.extra)?,
        ))
    }
}

/// Parse a price catalog from a YAML string.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price is negative or not an
/// integer, a field is missing, a table is empty, or a table repeats an option.
pub fn catalog_from_str(contents: &str) -> Result<PriceCatalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    fixture.try_into()
}

/// Load a price catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<PriceCatalog, FixtureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    debug!(path = %path.display(), "loading price catalog");

    catalog_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::pricing::pesos;

    use super::*;

    const SMALL: &str = r"
size: { 10: 100, '20': 200 }
bizcocho: { vainilla: 0 }
relleno: { manjar: 10 }
cobertura: { merengue: 20 }
extra: { drip-cake: 30 }
";

    #[test]
    fn parses_numeric_and_string_keys() -> TestResult {
        let catalog = catalog_from_str(SMALL)?;

        assert_eq!(catalog.price(Category::Size, "10")?, pesos(100));
        assert_eq!(catalog.price(Category::Size, "20")?, pesos(200));
        assert_eq!(catalog.price(Category::Extra, "drip-cake")?, pesos(30));

        Ok(())
    }

    #[test]
    fn rejects_empty_tables() {
        let yaml = SMALL.replace("relleno: { manjar: 10 }", "relleno: {}");

        let result = catalog_from_str(&yaml);

        assert!(matches!(
            result,
            Err(FixtureError::EmptyTable(Category::Filling))
        ));
    }

    #[test]
    fn rejects_numeric_and_string_keys_for_the_same_option() {
        let yaml = SMALL.replace("size: { 10: 100, '20': 200 }", "size: { 10: 100, '10': 999 }");

        let result = catalog_from_str(&yaml);

        assert!(matches!(
            result,
            Err(FixtureError::DuplicateOption { category: Category::Size, ref id }) if id == "10"
        ));
    }

    #[test]
    fn rejects_negative_prices() {
        let yaml = SMALL.replace("merengue: 20", "merengue: -20");

        assert!(matches!(catalog_from_str(&yaml), Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn rejects_missing_tables() {
        let yaml = SMALL.replace("extra: { drip-cake: 30 }", "");

        assert!(matches!(catalog_from_str(&yaml), Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn rejects_unknown_tables() {
        let yaml = format!("{SMALL}\ntopper: {{ vela: 500 }}\n");

        assert!(matches!(catalog_from_str(&yaml), Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_catalog("./does/not/exist.yml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
