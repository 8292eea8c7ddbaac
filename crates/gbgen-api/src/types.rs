//! Wire types of the GrowthBook Features API.
//!
//! Only the fields gbgen reads are modelled; unknown fields are ignored.
//! Missing fields and explicit `null`s both fall back to their defaults.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Response of `GET /features`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFeaturesResponse {
    /// Features of this page
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<Feature>,
    /// Whether another page follows
    #[serde(deserialize_with = "null_as_default")]
    pub has_more: bool,
    /// Offset of the next page, when the server provides one
    pub next_offset: Option<u64>,
    /// Page size the server applied
    #[serde(deserialize_with = "null_as_default")]
    pub limit: u64,
    /// Offset of this page
    #[serde(deserialize_with = "null_as_default")]
    pub offset: u64,
    /// Number of features in this page
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    /// Total number of features matching the filter
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
}

/// A feature flag as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    /// Feature key
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Free-text description
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Per-environment settings keyed by environment name
    #[serde(deserialize_with = "null_as_default")]
    pub environments: HashMap<String, FeatureEnvironment>,
    /// Raw value type (`boolean`, `string`, `number`, `json`, ...)
    #[serde(deserialize_with = "null_as_default")]
    pub value_type: String,
}

impl Feature {
    /// Returns `true` when no environment is enabled, including when the
    /// feature has no environments at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbgen_api::{Feature, FeatureEnvironment};
    ///
    /// let mut feature = Feature::default();
    /// assert!(feature.has_no_active_environments());
    ///
    /// feature
    ///     .environments
    ///     .insert("production".to_string(), FeatureEnvironment { enabled: true });
    /// assert!(!feature.has_no_active_environments());
    /// ```
    #[must_use]
    pub fn has_no_active_environments(&self) -> bool {
        !self.environments.values().any(|env| env.enabled)
    }
}

/// Settings of a feature in one environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureEnvironment {
    /// Whether the feature is enabled in this environment
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
}

/// Response of `GET /features/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFeatureResponse {
    /// The requested feature
    pub feature: Feature,
}

/// Reads `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
