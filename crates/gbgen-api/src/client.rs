//! GrowthBook Features API access.
//!
//! [`FeaturesApi`] is the narrow capability the fetcher and the CLI depend
//! on. [`HttpFeaturesApi`] implements it over HTTPS with a bearer token.

use crate::types::{Feature, GetFeatureResponse, ListFeaturesResponse};
use async_trait::async_trait;
use gbgen_core::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Path every GrowthBook REST endpoint lives under.
pub const API_PREFIX: &str = "/api/v1";

const USER_AGENT: &str = concat!("gbgen/", env!("CARGO_PKG_VERSION"));

/// The subset of the GrowthBook Features API used by gbgen.
///
/// Implementations must be `Send + Sync` so one instance can serve a whole
/// generation run on the Tokio runtime.
#[async_trait]
pub trait FeaturesApi: Send + Sync {
    /// Lists one page of features (`GET /features`).
    ///
    /// Returns `Ok(None)` when the server answered successfully without a
    /// payload (empty body or JSON `null`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ApiError`] on transport failures, non-success
    /// statuses, and malformed payloads.
    async fn list_features(
        &self,
        limit: u32,
        offset: u64,
        project_id: Option<&str>,
    ) -> Result<Option<ListFeaturesResponse>>;

    /// Lists every feature key (`GET /feature-keys`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ApiError`] or [`Error::EmptyResponse`].
    async fn get_feature_keys(&self, project_id: Option<&str>) -> Result<Vec<String>>;

    /// Fetches a single feature (`GET /features/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ApiError`] (status 404 for unknown ids) or
    /// [`Error::EmptyResponse`].
    async fn get_feature(&self, id: &str) -> Result<Feature>;
}

#[async_trait]
impl<T: FeaturesApi + ?Sized> FeaturesApi for Arc<T> {
    async fn list_features(
        &self,
        limit: u32,
        offset: u64,
        project_id: Option<&str>,
    ) -> Result<Option<ListFeaturesResponse>> {
        (**self).list_features(limit, offset, project_id).await
    }

    async fn get_feature_keys(&self, project_id: Option<&str>) -> Result<Vec<String>> {
        (**self).get_feature_keys(project_id).await
    }

    async fn get_feature(&self, id: &str) -> Result<Feature> {
        (**self).get_feature(id).await
    }
}

/// Normalizes a configured API host to the `/api/v1` base URL.
///
/// Trailing slashes are trimmed and the prefix is appended unless already
/// present.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the result is not an absolute
/// `http`/`https` URL.
///
/// # Examples
///
/// ```
/// use gbgen_api::normalize_base_url;
///
/// let url = normalize_base_url("https://api.growthbook.io/").unwrap();
/// assert_eq!(url.as_str(), "https://api.growthbook.io/api/v1");
///
/// let url = normalize_base_url("http://localhost:3100/api/v1").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:3100/api/v1");
/// ```
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let base = if trimmed.ends_with(API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{API_PREFIX}")
    };

    let url = Url::parse(&base).map_err(|e| Error::ConfigError {
        message: format!("invalid GrowthBook API base URL {raw:?}: {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::ConfigError {
            message: format!("invalid GrowthBook API base URL {raw:?}: expected http(s)"),
        });
    }
    Ok(url)
}

/// [`FeaturesApi`] over HTTP.
///
/// # Examples
///
/// ```
/// use gbgen_api::HttpFeaturesApi;
/// use secrecy::SecretString;
///
/// let api = HttpFeaturesApi::new(
///     "https://api.growthbook.io",
///     SecretString::from("secret_abc".to_string()),
/// )
/// .unwrap();
/// assert_eq!(api.base_url().as_str(), "https://api.growthbook.io/api/v1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpFeaturesApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
}

impl HttpFeaturesApi {
    /// Creates a client for the given API host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the base URL is invalid and
    /// [`Error::ApiError`] if the HTTP client cannot be constructed.
    pub fn new(api_base_url: &str, api_key: SecretString) -> Result<Self> {
        let base_url = normalize_base_url(api_base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| transport_error("build client", e))?;

        tracing::debug!(base_url = %base_url, "Created GrowthBook API client");

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Returns the normalized `/api/v1` base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::ConfigError {
                message: format!("cannot build endpoint from {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Performs an authenticated GET and decodes an optional JSON body.
    async fn get_json<T>(
        &self,
        operation: &str,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(operation, url = %url, "GrowthBook API request");

        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(operation, e))?;

        if !status.is_success() {
            return Err(Error::ApiError {
                operation: operation.to_string(),
                status: Some(status.as_u16()),
                message: format!("{status}: {}", error_message(&body)),
                source: None,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<T>>(&body).map_err(|e| Error::ApiError {
            operation: operation.to_string(),
            status: Some(status.as_u16()),
            message: format!("malformed response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl FeaturesApi for HttpFeaturesApi {
    async fn list_features(
        &self,
        limit: u32,
        offset: u64,
        project_id: Option<&str>,
    ) -> Result<Option<ListFeaturesResponse>> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(project) = project_id.filter(|p| !p.is_empty()) {
            query.push(("projectId", project.to_string()));
        }
        let url = self.endpoint(&["features"])?;
        self.get_json("list features", url, &query).await
    }

    async fn get_feature_keys(&self, project_id: Option<&str>) -> Result<Vec<String>> {
        let mut query = Vec::new();
        if let Some(project) = project_id.filter(|p| !p.is_empty()) {
            query.push(("projectId", project.to_string()));
        }
        let url = self.endpoint(&["feature-keys"])?;
        self.get_json("get feature keys", url, &query)
            .await?
            .ok_or_else(|| Error::EmptyResponse {
                operation: "get feature keys".to_string(),
            })
    }

    async fn get_feature(&self, id: &str) -> Result<Feature> {
        let url = self.endpoint(&["features", id])?;
        let response: Option<GetFeatureResponse> = self.get_json("get feature", url, &[]).await?;
        response
            .map(|r| r.feature)
            .ok_or_else(|| Error::EmptyResponse {
                operation: "get feature".to_string(),
            })
    }
}

fn transport_error(operation: &str, err: reqwest::Error) -> Error {
    Error::ApiError {
        operation: operation.to_string(),
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

/// Extracts a readable message from an error body.
///
/// GrowthBook answers errors with `{"message": "..."}`; anything else is
/// shown as trimmed text.
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed.message;
    }
    String::from_utf8_lossy(body).trim().to_string()
}
