//! HTTP client for the remote listing endpoint

mod retry;

pub use retry::RetryConfig;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::model::Page;
use crate::model::Record;

/// Fetches pages of the remote listing over HTTP.
///
/// The page number is appended to the configured URL, so the URL normally
/// ends in a query parameter such as `?page=`. The endpoint must answer with
/// `{"data": [records...], "pagination": {"total": N}}`.
///
/// This client is cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use pageselect_lib::client::ListingClient;
///
/// let client = ListingClient::builder()
///     .url("https://api.artic.edu/api/v1/artworks?page=")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.fetch_page(1).await?;
/// ```
#[derive(Clone)]
pub struct ListingClient {
    inner: Arc<ListingClientInner>,
}

struct ListingClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
    retry: RetryConfig,
}

impl ListingClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ListingClientBuilder<Missing> {
        ListingClientBuilder::new()
    }

    /// Returns the base URL page numbers are appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}{}", self.inner.base_url, page)
    }

    async fn fetch_once(&self, page: u32) -> Result<Page, FetchError> {
        let url = self.page_url(page);
        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(&url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), body));
        }

        parse_page(page, &body)
    }
}

#[async_trait]
impl PageFetcher for ListingClient {
    async fn fetch_page(&self, page: u32) -> Result<Page, FetchError> {
        let retry = &self.inner.retry;
        let mut attempt = 0;
        loop {
            match self.fetch_once(page).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                    let delay = retry.delay_for(attempt);
                    log::warn!(
                        "fetching page {} failed ({}), retrying in {:?}",
                        page,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Listing response body.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: Vec<Record>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: usize,
}

fn parse_page(page: u32, body: &str) -> Result<Page, FetchError> {
    let response: ListingResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse_with_body(e.to_string(), body))?;
    Ok(Page::new(page, response.data, response.pagination.total))
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ListingClient`].
///
/// The URL is required and enforced at compile time.
pub struct ListingClientBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: RetryConfig,
    http_client: Option<Client>,
}

impl ListingClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            retry: RetryConfig::default(),
            http_client: None,
        }
    }

    /// Sets the listing URL page numbers are appended to.
    pub fn url(self, url: impl Into<String>) -> ListingClientBuilder<Set<String>> {
        ListingClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry: self.retry,
            http_client: self.http_client,
        }
    }
}

impl Default for ListingClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ListingClientBuilder<U> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout, applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ListingClientBuilder<Set<String>> {
    /// Builds the [`ListingClient`].
    pub fn build(self) -> Result<ListingClient, FetchError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(ListingClient {
            inner: Arc::new(ListingClientInner {
                base_url: self.url.0,
                http_client,
                timeout: self.timeout,
                retry: self.retry,
            }),
        })
    }
}
