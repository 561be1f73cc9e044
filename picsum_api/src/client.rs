//! HTTP client for the Lorem Picsum catalog.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ListQuery, Query},
    types::{Photo, PhotoID},
    Error,
};

/// Production catalog host.
pub const DEFAULT_BASE_URL: &str = "https://picsum.photos";

const USER_AGENT: &str = concat!("picsum_api/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Lorem Picsum catalog.
///
/// Each request builds a fresh `reqwest::Client` with the configured timeout
/// (30 seconds unless overridden).
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the catalog, without a trailing slash.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production catalog.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Appends `segments` to the base URL. Each segment is percent-encoded on
    /// its own, so `/`, `?` and `#` inside a segment never change the path.
    fn get_url(&self, segments: &[&str], query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::request_failed(format!("invalid base URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::request_failed("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(segments, query)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::request_failed(e.to_string())
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::request_failed(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::request_failed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::request_failed(format!("invalid response body: {}", e))
        })?;

        Ok(parsed)
    }

    /// Fetches one page of the photo listing.
    pub async fn get_photos(&self, query: &ListQuery) -> Result<Vec<Photo>, Error> {
        self.get::<Vec<Photo>, ListQuery>(&["v2", "list"], Some(query))
            .await
    }

    /// Fetches page `page` with `limit` photos per page.
    pub async fn list_photos(&self, page: u32, limit: u32) -> Result<Vec<Photo>, Error> {
        self.get_photos(&ListQuery::default().with_page(page).with_limit(limit))
            .await
    }

    /// Fetches the metadata of a single photo. A 404 maps to [`Error::NotFound`].
    ///
    /// The id is sent as one encoded path segment whatever characters it holds.
    pub async fn get_photo(&self, id: &str) -> Result<Photo, Error> {
        self.get::<Photo, ListQuery>(&["id", id, "info"], None)
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status: 404, .. } => Error::NotFound {
                    id: PhotoID::from(id),
                },
                other => other,
            })
    }

    /// URL of a thumbnail rendering. Pure string construction, no request is made.
    pub fn thumbnail_url(&self, id: &str, width: u32, height: u32) -> String {
        self.image_url(id, width, height)
    }

    /// URL of a full-size rendering. Pure string construction, no request is made.
    pub fn full_size_url(&self, id: &str, width: u32, height: u32) -> String {
        self.image_url(id, width, height)
    }

    fn image_url(&self, id: &str, width: u32, height: u32) -> String {
        format!("{}/id/{}/{}/{}", self.base_api_url, id, width, height)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
