//! Catalog types shared by the fetcher and the code generator.
//!
//! A generation run builds a list of [`FeatureMeta`] from the API, sorts it
//! by id, and turns it into [`NamedFeature`] values once identifiers have
//! been synthesized. Both are plain values produced fresh for each run.
//!
//! # Examples
//!
//! ```
//! use gbgen_core::{FeatureMeta, ValueType};
//!
//! let meta = FeatureMeta::new("checkout-redesign", ValueType::Boolean)
//!     .with_description("Checkout redesign flag");
//! assert_eq!(meta.id, "checkout-redesign");
//! assert!(!meta.no_active_environments);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type of a feature flag as reported by the API.
///
/// Unknown types are kept verbatim in [`ValueType::Other`] so that fetching
/// never fails on them; only typed rendering rejects them.
///
/// # Examples
///
/// ```
/// use gbgen_core::ValueType;
///
/// assert_eq!(ValueType::from_raw("boolean"), ValueType::Boolean);
/// assert_eq!(ValueType::from_raw("json").as_str(), "json");
/// assert_eq!(ValueType::from_raw("enum"), ValueType::Other("enum".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    /// `boolean`
    Boolean,
    /// `string`
    String,
    /// `number`
    Number,
    /// `json`
    Json,
    /// Any value type this tool has no wrapper for
    Other(String),
}

impl ValueType {
    /// Parses a raw API value type. Matching is exact.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "boolean" => Self::Boolean,
            "string" => Self::String,
            "number" => Self::Number,
            "json" => Self::Json,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the API spelling of the value type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::Json => "json",
            Self::Other(raw) => raw,
        }
    }

    /// Returns `true` for the four value types with a typed wrapper.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ValueType {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        value_type.as_str().to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation-relevant metadata of one remote feature flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMeta {
    /// Canonical feature key; never empty in a fetched catalog
    pub id: String,
    /// Free-text description, possibly multi-line
    pub description: String,
    /// Declared value type
    pub value_type: ValueType,
    /// True when the flag has no environments or all of them are disabled
    pub no_active_environments: bool,
}

impl FeatureMeta {
    /// Creates metadata with an empty description and at least one active
    /// environment.
    #[must_use]
    pub fn new(id: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            value_type,
            no_active_environments: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks whether the feature has no active environments.
    #[must_use]
    pub const fn with_no_active_environments(mut self, value: bool) -> Self {
        self.no_active_environments = value;
        self
    }
}

/// A catalog entry together with its synthesized source identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedFeature {
    /// Exported Go identifier, unique within one generation run
    pub name: String,
    /// Metadata the name was derived from
    pub meta: FeatureMeta,
}

impl NamedFeature {
    /// Returns the raw feature id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.meta.id
    }
}

/// Sorts a catalog ascending by id.
///
/// The sort is stable and compares ids byte-wise, so generated output does
/// not depend on the order the API returned features in.
///
/// # Examples
///
/// ```
/// use gbgen_core::{FeatureMeta, ValueType, sort_catalog};
///
/// let mut catalog = vec![
///     FeatureMeta::new("b", ValueType::Boolean),
///     FeatureMeta::new("a", ValueType::Boolean),
/// ];
/// sort_catalog(&mut catalog);
/// assert_eq!(catalog[0].id, "a");
/// ```
pub fn sort_catalog(catalog: &mut [FeatureMeta]) {
    catalog.sort_by(|a, b| a.id.cmp(&b.id));
}
