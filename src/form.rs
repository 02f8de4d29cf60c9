//! Form data
//!
//! Ordered `(field, value)` pairs, as submitted by the option form.

use std::str::FromStr;

use thiserror::Error;

/// Errors parsing encoded form data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormDataError {
    /// A pair had no `=` separator
    #[error("Malformed form pair '{0}', expected 'field=value'")]
    MalformedPair(String),

    /// A pair had an empty field name
    #[error("Empty field name in form pair '{0}'")]
    EmptyField(String),
}

/// Field values of the option form, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for a field.
    pub fn append(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// First value of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a field, in order.
    pub fn get_all(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `field=value&field=value` encoded data.
    ///
    /// `+` decodes to a space. Empty segments are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment has no `=` or an empty field name.
    pub fn parse(encoded: &str) -> Result<Self, FormDataError> {
        let mut data = Self::new();

        for pair in encoded.split('&').filter(|pair| !pair.is_empty()) {
            let (field, value) = pair
                .split_once('=')
                .ok_or_else(|| FormDataError::MalformedPair(pair.to_string()))?;

            if field.is_empty() {
                return Err(FormDataError::EmptyField(pair.to_string()));
            }

            data.append(field.replace('+', " "), value.replace('+', " "));
        }

        Ok(data)
    }
}

impl FromStr for FormData {
    type Err = FormDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<F, V> FromIterator<(F, V)> for FormData
where
    F: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (F, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}
