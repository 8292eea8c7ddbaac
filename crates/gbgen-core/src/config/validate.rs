//! Configuration validation.

use super::Config;
use crate::ident::is_go_package_name;
use crate::{Error, Result};
use url::Url;

impl Config {
    /// Checks that the config is complete enough to run the generator.
    ///
    /// Every problem is collected before returning, in field order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] listing every problem found.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbgen_core::config::Config;
    ///
    /// let err = Config::default().validate().unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid configuration:\n - growthbook.apiKey is required"
    /// );
    ///
    /// assert!(Config::sample().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        let growthbook = &self.growthbook;
        let generator = &self.generator;

        if growthbook.api_base_url.trim().is_empty() {
            problems.push("growthbook.apiBaseURL is required".to_string());
        } else if !is_http_url(&growthbook.api_base_url) {
            problems.push(
                "growthbook.apiBaseURL must be a valid URL (e.g. https://api.growthbook.io)"
                    .to_string(),
            );
        }

        if growthbook.api_key.trim().is_empty() {
            problems.push("growthbook.apiKey is required".to_string());
        }

        if generator.output_dir.trim().is_empty() {
            problems.push("generator.outputDir is required".to_string());
        }

        if generator.package_name.trim().is_empty() {
            problems.push("generator.packageName is required".to_string());
        } else if !is_go_package_name(&generator.package_name) {
            problems.push("generator.packageName must be a valid Go package name".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = problems.len(), "Configuration failed validation");
            Err(Error::InvalidConfig { problems })
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}
