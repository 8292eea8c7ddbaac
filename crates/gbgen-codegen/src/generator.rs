//! Generation orchestrator.
//!
//! Runs fetch, synthesis, and rendering in sequence for one configuration.
//! The first failing stage aborts the run and nothing partial is returned.

use crate::naming::synthesize;
use crate::renderer::Renderer;
use gbgen_api::{FeaturesApi, HttpFeaturesApi, MetadataFetcher};
use gbgen_core::config::Config;
use gbgen_core::{BuildInfo, Error, NamedFeature, Result};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;

/// Name of the generated file inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "features.gen.go";

/// Generates Go source for the feature catalog described by a [`Config`].
///
/// # Examples
///
/// ```no_run
/// use gbgen_codegen::Generator;
/// use gbgen_core::BuildInfo;
/// use gbgen_core::config::Config;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> gbgen_core::Result<()> {
/// let mut config = Config::default();
/// config.growthbook.api_key = "secret_abc".to_string();
///
/// let generator = Generator::new(&config, BuildInfo::current())?;
/// let source = generator.generate(&CancellationToken::new()).await?;
/// println!("{} bytes", source.len());
/// # Ok(())
/// # }
/// ```
pub struct Generator {
    api: Box<dyn FeaturesApi>,
    renderer: Renderer,
    config: Config,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("renderer", &self.renderer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Creates a generator talking to the GrowthBook API over HTTP.
    ///
    /// The API host from `config` is normalized to its `/api/v1` base and
    /// the API key is sent as a bearer token on every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the base URL is invalid and
    /// [`Error::TemplateError`] if the renderer cannot be built.
    pub fn new(config: &Config, build_info: BuildInfo) -> Result<Self> {
        let api = HttpFeaturesApi::new(
            &config.growthbook.api_base_url,
            SecretString::from(config.growthbook.api_key.clone()),
        )?;
        Self::with_api(config, build_info, api)
    }

    /// Creates a generator using any [`FeaturesApi`] implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the renderer cannot be built.
    pub fn with_api<A>(config: &Config, build_info: BuildInfo, api: A) -> Result<Self>
    where
        A: FeaturesApi + 'static,
    {
        Ok(Self {
            api: Box::new(api),
            renderer: Renderer::new(build_info)?,
            config: config.clone(),
        })
    }

    /// Fetches the catalog and renders it in the configured mode.
    ///
    /// Typed wrappers are rendered when `emitTypedFeatures` is set, plain
    /// keys otherwise; `emitFeatureList` adds the ordered list.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage: API and pagination errors,
    /// [`Error::Cancelled`], [`Error::UnsupportedValueType`] (typed mode
    /// only), or [`Error::FormatError`].
    pub async fn generate(&self, cancel: &CancellationToken) -> Result<Vec<u8>> {
        let named = self.catalog(cancel).await?;
        let generator = &self.config.generator;

        if cancel.is_cancelled() {
            return Err(Error::Cancelled {
                operation: "generate".to_string(),
            });
        }

        let source = if generator.emit_typed_features {
            self.renderer
                .render_typed(&generator.package_name, &named, generator.emit_feature_list)?
        } else {
            self.renderer
                .render_keys(&generator.package_name, &named, generator.emit_feature_list)?
        };

        tracing::info!(
            features = named.len(),
            bytes = source.len(),
            typed = generator.emit_typed_features,
            feature_list = generator.emit_feature_list,
            "Generated Go source"
        );
        Ok(source)
    }

    /// Fetches the sorted catalog and assigns identifiers.
    ///
    /// # Errors
    ///
    /// Same fetch errors as [`Generator::generate`].
    pub async fn catalog(&self, cancel: &CancellationToken) -> Result<Vec<NamedFeature>> {
        let project_id = self.config.growthbook.project_id.as_deref();
        let catalog = MetadataFetcher::new(self.api.as_ref())
            .fetch_all(project_id, cancel)
            .await?;
        Ok(synthesize(&catalog))
    }

    /// Verifies credentials and connectivity by listing feature keys.
    ///
    /// Returns the number of keys visible with the configured project
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns API errors, or [`Error::Cancelled`] if `cancel` fires first.
    pub async fn check(&self, cancel: &CancellationToken) -> Result<usize> {
        let project_id = self.config.growthbook.project_id.as_deref();
        let keys = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(Error::Cancelled {
                    operation: "get feature keys".to_string(),
                });
            }
            keys = self.api.get_feature_keys(project_id) => keys?,
        };

        tracing::info!(keys = keys.len(), "GrowthBook API reachable");
        Ok(keys.len())
    }
}
