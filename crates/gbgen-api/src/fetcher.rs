//! Paginated catalog fetch.

use crate::client::FeaturesApi;
use crate::types::ListFeaturesResponse;
use gbgen_core::{Error, FeatureMeta, Result, ValueType, sort_catalog};
use tokio_util::sync::CancellationToken;

/// Number of features requested per page.
pub const PAGE_SIZE: u32 = 100;

const OPERATION: &str = "list features";

/// Fetches the complete feature catalog through a [`FeaturesApi`].
///
/// # Examples
///
/// ```no_run
/// use gbgen_api::{HttpFeaturesApi, MetadataFetcher};
/// use secrecy::SecretString;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> gbgen_core::Result<()> {
/// let api = HttpFeaturesApi::new(
///     "https://api.growthbook.io",
///     SecretString::from(std::env::var("GBGEN_API_KEY").unwrap()),
/// )?;
///
/// let catalog = MetadataFetcher::new(&api)
///     .fetch_all(Some("prj_abc"), &CancellationToken::new())
///     .await?;
/// println!("{} features", catalog.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MetadataFetcher<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A> MetadataFetcher<'a, A>
where
    A: FeaturesApi + ?Sized,
{
    /// Creates a fetcher requesting [`PAGE_SIZE`] features per page.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Retrieves every feature visible to the credentials, sorted by id.
    ///
    /// Pages are requested one at a time starting at offset 0. Features with
    /// an empty id are skipped. The next offset is the server's `nextOffset`
    /// when present, otherwise the current offset plus the page length.
    ///
    /// # Errors
    ///
    /// - [`Error::ApiError`] if any page request fails
    /// - [`Error::EmptyResponse`] if a page has no payload
    /// - [`Error::PaginationStalled`] if `hasMore` is set but the offset does
    ///   not advance
    /// - [`Error::Cancelled`] if `cancel` fires before or during a request
    ///
    /// No partial catalog is returned on error.
    pub async fn fetch_all(
        &self,
        project_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<FeatureMeta>> {
        let mut catalog = Vec::new();
        let mut offset = 0_u64;
        let mut pages = 0_usize;

        loop {
            let page = self.fetch_page(offset, project_id, cancel).await?;
            pages += 1;

            tracing::debug!(
                offset,
                count = page.features.len(),
                has_more = page.has_more,
                "Fetched features page"
            );

            let page_len = page.features.len() as u64;
            for feature in page.features {
                if feature.id.is_empty() {
                    tracing::warn!(offset, "Skipping feature without id");
                    continue;
                }
                let no_active_environments = feature.has_no_active_environments();
                catalog.push(
                    FeatureMeta::new(feature.id, ValueType::from(feature.value_type))
                        .with_description(feature.description)
                        .with_no_active_environments(no_active_environments),
                );
            }

            if !page.has_more {
                break;
            }

            let next_offset = page.next_offset.unwrap_or(offset + page_len);
            if next_offset <= offset {
                return Err(Error::PaginationStalled {
                    offset,
                    next_offset,
                });
            }
            offset = next_offset;
        }

        sort_catalog(&mut catalog);
        tracing::info!(features = catalog.len(), pages, "Fetched feature catalog");
        Ok(catalog)
    }

    async fn fetch_page(
        &self,
        offset: u64,
        project_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ListFeaturesResponse> {
        if cancel.is_cancelled() {
            return Err(cancelled());
        }

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled()),
            response = self.api.list_features(PAGE_SIZE, offset, project_id) => response?,
        };

        response.ok_or_else(|| Error::EmptyResponse {
            operation: OPERATION.to_string(),
        })
    }
}

fn cancelled() -> Error {
    Error::Cancelled {
        operation: OPERATION.to_string(),
    }
}
