//! Overpass interpreter client.

use std::time::Duration;

use crate::retry::{RetryPolicy, send_with_retry};
use crate::{BoundingBox, OverpassError, OverpassResponse, wind_turbine_query};

/// Public Overpass instance operated by FOSSGIS.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Client-side timeout for a single interpreter request. Large boxes can
/// take minutes to evaluate on a busy server.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Sends Overpass QL queries to an interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl OverpassClient {
    /// Creates a client for `url` with the default timeout and retry
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, OverpassError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Creates a client for `url` with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the HTTP client cannot be built.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, OverpassError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_owned(),
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The interpreter endpoint this client talks to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs an Overpass QL query and parses the JSON answer.
    ///
    /// The query is passed as the `data` parameter of a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError`] if the request fails after all retries or
    /// the body is not a valid Overpass JSON document.
    pub async fn fetch(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        log::debug!("Overpass query:\n{query}");

        let response = send_with_retry(
            || self.client.get(&self.url).query(&[("data", query)]),
            &self.retry,
        )
        .await?;

        let status = response.status();
        let text = response.text().await?;

        let parsed: OverpassResponse = serde_json::from_str(&text).map_err(|e| {
            let preview = preview(&text);
            log::error!(
                "Overpass answer is not valid JSON.\n  \
                 url: {}\n  \
                 status: {status}\n  \
                 received: {} bytes\n  \
                 parse error: {e}\n  \
                 body preview: {preview}",
                self.url,
                text.len(),
            );
            e
        })?;

        if let Some(remark) = &parsed.remark {
            log::warn!("Overpass remark: {remark}");
        }

        log::info!(
            "Overpass returned {} elements (data as of {})",
            parsed.elements.len(),
            parsed.data_timestamp().unwrap_or("unknown"),
        );

        Ok(parsed)
    }

    /// Fetches every wind turbine inside `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError`] if the query fails.
    pub async fn fetch_wind_turbines(
        &self,
        bbox: &BoundingBox,
    ) -> Result<OverpassResponse, OverpassError> {
        log::info!("Querying {} for wind turbines in {bbox}", self.url);
        self.fetch(&wind_turbine_query(bbox)).await
    }
}

fn preview(text: &str) -> &str {
    if text.len() <= BODY_PREVIEW_LEN {
        return text;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
