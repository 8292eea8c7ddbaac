//! Feature command implementation.
//!
//! Looks up a single feature and shows the identifier it would be given.

use super::common::{ConfigArgs, load_config};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use gbgen_api::{Feature, FeaturesApi, HttpFeaturesApi};
use gbgen_codegen::naming::{NAME_PREFIX, to_exported_identifier};
use gbgen_core::ValueType;
use gbgen_core::cli::{ExitCode, OutputFormat};
use secrecy::SecretString;
use serde::Serialize;
use std::path::PathBuf;

/// Metadata of one feature as gbgen sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    /// Raw feature key
    pub id: String,
    /// Identifier before collision suffixes
    pub identifier: String,
    /// Declared value type
    pub value_type: String,
    /// Whether typed mode can wrap this value type
    pub supported: bool,
    /// Free-form description
    pub description: String,
    /// Environments in which the feature is enabled, sorted
    pub enabled_environments: Vec<String>,
    /// Whether the feature would be marked deprecated
    pub deprecated: bool,
}

impl From<Feature> for FeatureSummary {
    fn from(feature: Feature) -> Self {
        let deprecated = feature.has_no_active_environments();
        let value_type = ValueType::from(feature.value_type);

        let mut enabled_environments: Vec<String> = feature
            .environments
            .into_iter()
            .filter_map(|(name, env)| env.enabled.then_some(name))
            .collect();
        enabled_environments.sort();

        Self {
            identifier: format!("{NAME_PREFIX}{}", to_exported_identifier(&feature.id)),
            id: feature.id,
            value_type: value_type.as_str().to_string(),
            supported: value_type.is_supported(),
            description: feature.description,
            enabled_environments,
            deprecated,
        }
    }
}

/// Runs the feature command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the feature cannot be
/// fetched (404 for unknown ids).
pub async fn run(
    id: String,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let config = load_config(config_path, args)?;
    let api = HttpFeaturesApi::new(
        &config.growthbook.api_base_url,
        SecretString::from(config.growthbook.api_key),
    )
    .context("failed to create API client")?;

    let summary = lookup(&api, &id).await?;
    println!("{}", format_output(&summary, output_format)?);
    Ok(ExitCode::SUCCESS)
}

/// Fetches one feature and summarizes it.
///
/// # Errors
///
/// Returns the API error with the feature id as context.
pub async fn lookup<A>(api: &A, id: &str) -> Result<FeatureSummary>
where
    A: FeaturesApi + ?Sized,
{
    let feature = api
        .get_feature(id)
        .await
        .with_context(|| format!("failed to fetch feature {id:?}"))?;
    Ok(feature.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::exit_code_for;
    use gbgen_api::{FakeFeaturesApi, FeatureEnvironment};
    use std::collections::HashMap;

    fn banner() -> Feature {
        Feature {
            id: "promo.banner".to_string(),
            description: "Homepage banner".to_string(),
            environments: HashMap::from([
                ("production".to_string(), FeatureEnvironment { enabled: true }),
                ("dev".to_string(), FeatureEnvironment { enabled: true }),
                ("staging".to_string(), FeatureEnvironment { enabled: false }),
            ]),
            value_type: "string".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_summarizes_feature() {
        let api = FakeFeaturesApi::with_features(vec![banner()]);
        let summary = lookup(&api, "promo.banner").await.unwrap();

        assert_eq!(summary.identifier, "FeaturePromoBanner");
        assert_eq!(summary.value_type, "string");
        assert!(summary.supported);
        assert_eq!(summary.enabled_environments, vec!["dev", "production"]);
        assert!(!summary.deprecated);
    }

    #[tokio::test]
    async fn test_lookup_unknown_feature() {
        let api = FakeFeaturesApi::with_features(vec![banner()]);
        let err = lookup(&api, "missing").await.unwrap_err();

        assert!(format!("{err:#}").contains("\"missing\""));
        assert_eq!(exit_code_for(&err), ExitCode::SERVER_ERROR);
    }

    #[test]
    fn test_unsupported_type_is_reported() {
        let summary = FeatureSummary::from(Feature {
            id: "odd".to_string(),
            value_type: "enum".to_string(),
            ..Default::default()
        });
        assert_eq!(summary.value_type, "enum");
        assert!(!summary.supported);
        assert!(summary.deprecated);
    }
}
