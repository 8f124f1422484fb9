//! Per-property style values.
//!
//! A [`Style`] is either one value shared by every sector, or a map from
//! property to value. In TOML a constant is written inline and a per-property
//! style as a table:
//!
//! ```toml
//! foreground = "white"
//! background = { EU = "#003399", EFTA = "#ffcc00" }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::HyperCollError;

/// A value that is either constant or chosen by sector property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Style<T> {
    Constant(T),
    ByProperty(IndexMap<String, T>),
}

impl<T> Style<T> {
    /// Returns the value for `property`.
    ///
    /// # Errors
    ///
    /// Returns [`HyperCollError::MissingStyle`] when a per-property style has
    /// no entry for `property`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hypercoll::Style;
    /// # use indexmap::IndexMap;
    /// let constant = Style::Constant(1.0);
    /// assert_eq!(*constant.resolve("anything").unwrap(), 1.0);
    ///
    /// let by_property = Style::ByProperty(IndexMap::from([("EU".to_string(), 2.0)]));
    /// assert_eq!(*by_property.resolve("EU").unwrap(), 2.0);
    /// assert!(by_property.resolve("EFTA").is_err());
    /// ```
    pub fn resolve(&self, property: &str) -> Result<&T, HyperCollError> {
        match self {
            Self::Constant(value) => Ok(value),
            Self::ByProperty(values) => values
                .get(property)
                .ok_or_else(|| HyperCollError::MissingStyle(property.to_string())),
        }
    }
}

impl<T: Default> Default for Style<T> {
    fn default() -> Self {
        Self::Constant(T::default())
    }
}

impl<T> From<T> for Style<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}
