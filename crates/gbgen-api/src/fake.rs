//! In-memory [`FeaturesApi`] for tests.
//!
//! Pages are served in order, one per `list_features` call, regardless of
//! the requested offset. Once the pages are exhausted further list calls
//! fail with an API error, which makes runaway pagination visible in tests.

use crate::client::FeaturesApi;
use crate::types::{Feature, ListFeaturesResponse};
use async_trait::async_trait;
use gbgen_core::{Error, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Scripted, call-recording [`FeaturesApi`].
#[derive(Debug, Default)]
pub struct FakeFeaturesApi {
    pages: Vec<Option<ListFeaturesResponse>>,
    failure: Option<(u16, String)>,
    calls: Mutex<Calls>,
}

#[derive(Debug, Default)]
struct Calls {
    offsets: Vec<u64>,
    projects: Vec<Option<String>>,
}

impl FakeFeaturesApi {
    /// Serves the given pages in order. `None` models an empty payload.
    #[must_use]
    pub fn with_pages(pages: Vec<Option<ListFeaturesResponse>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Serves all features as a single, final page.
    #[must_use]
    pub fn with_features(features: Vec<Feature>) -> Self {
        let count = features.len() as u64;
        Self::with_pages(vec![Some(ListFeaturesResponse {
            features,
            has_more: false,
            next_offset: None,
            limit: count,
            offset: 0,
            count,
            total: count,
        })])
    }

    /// Fails every call with the given HTTP status.
    #[must_use]
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            failure: Some((status, message.into())),
            ..Self::default()
        }
    }

    /// Offsets of every `list_features` call, in order.
    #[must_use]
    pub fn requested_offsets(&self) -> Vec<u64> {
        self.calls().offsets.clone()
    }

    /// Project filters of every `list_features` call, in order.
    #[must_use]
    pub fn requested_projects(&self) -> Vec<Option<String>> {
        self.calls().projects.clone()
    }

    fn calls(&self) -> MutexGuard<'_, Calls> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn features(&self) -> impl Iterator<Item = &Feature> {
        self.pages.iter().flatten().flat_map(|page| &page.features)
    }

    fn check_failure(&self, operation: &str) -> Result<()> {
        match &self.failure {
            Some((status, message)) => Err(api_error(operation, *status, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FeaturesApi for FakeFeaturesApi {
    async fn list_features(
        &self,
        _limit: u32,
        offset: u64,
        project_id: Option<&str>,
    ) -> Result<Option<ListFeaturesResponse>> {
        let index = {
            let mut calls = self.calls();
            calls.offsets.push(offset);
            calls.projects.push(project_id.map(str::to_string));
            calls.offsets.len() - 1
        };
        self.check_failure("list features")?;

        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| api_error("list features", 500, "no more scripted pages"))
    }

    async fn get_feature_keys(&self, _project_id: Option<&str>) -> Result<Vec<String>> {
        self.check_failure("get feature keys")?;
        Ok(self
            .features()
            .filter(|f| !f.id.is_empty())
            .map(|f| f.id.clone())
            .collect())
    }

    async fn get_feature(&self, id: &str) -> Result<Feature> {
        self.check_failure("get feature")?;
        self.features()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| api_error("get feature", 404, "Could not find feature"))
    }
}

fn api_error(operation: &str, status: u16, message: &str) -> Error {
    Error::ApiError {
        operation: operation.to_string(),
        status: Some(status),
        message: message.to_string(),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_helpers() {
        let api = FakeFeaturesApi::with_features(vec![
            Feature {
                id: "a".to_string(),
                ..Default::default()
            },
            Feature::default(),
        ]);

        assert_eq!(api.get_feature_keys(None).await.unwrap(), vec!["a"]);
        assert_eq!(api.get_feature("a").await.unwrap().id, "a");
        assert_eq!(
            api.get_feature("missing").await.unwrap_err().http_status(),
            Some(404)
        );
    }

    #[tokio::test]
    async fn test_failing_fake_records_calls() {
        let api = FakeFeaturesApi::failing(401, "Unauthorized");
        let err = api.list_features(100, 0, Some("prj")).await.unwrap_err();

        assert_eq!(err.http_status(), Some(401));
        assert_eq!(api.requested_offsets(), vec![0]);
        assert_eq!(api.requested_projects(), vec![Some("prj".to_string())]);
    }
}
