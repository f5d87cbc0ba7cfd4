//! HTTP retry helper for transient Overpass failures.
//!
//! Public Overpass instances shed load aggressively: they answer HTTP 429
//! when a client exceeds its slot allowance and HTTP 504 when the
//! interpreter queue is full. Both are worth retrying after a pause.
//! Other 4xx responses (usually a malformed query) are permanent.

use std::time::Duration;

use crate::OverpassError;

/// Retries after the first attempt unless configured otherwise.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Retry settings for a single logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles on every further retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    /// Three retries starting at 2s (2s, 4s, 8s).
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Sets the retry count.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the initial backoff delay.
    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Backoff before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Sends the request built by `build_request`, retrying transient failures
/// according to `policy`. Returns the first successful (2xx/3xx)
/// [`reqwest::Response`].
///
/// The closure is called once per attempt since request builders are
/// consumed by `.send()`.
///
/// # Errors
///
/// Returns [`OverpassError::Http`] for non-transient transport errors or
/// when retries are exhausted on a transport error, and
/// [`OverpassError::Status`] for permanent 4xx responses or when retries
/// are exhausted on 429/5xx.
#[allow(clippy::future_not_send)]
pub async fn send_with_retry<F>(
    build_request: F,
    policy: &RetryPolicy,
) -> Result<reqwest::Response, OverpassError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let max_retries = policy.max_retries;
    let mut attempt: u32 = 0;

    loop {
        if attempt > 0 {
            let delay = policy.delay_for(attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < max_retries {
                    log::warn!("  transient error: {e}");
                    attempt += 1;
                    continue;
                }
                return Err(OverpassError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    if attempt < max_retries {
                        log::warn!("  HTTP {status} (server busy or rate limited)");
                        attempt += 1;
                        continue;
                    }
                    return Err(OverpassError::Status {
                        status: status.as_u16(),
                        message: format!("still failing after {max_retries} retries"),
                    });
                }

                if status.is_client_error() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(OverpassError::Status {
                        status: status.as_u16(),
                        message: summarize_error_body(&body),
                    });
                }

                return Ok(response);
            }
        }
    }
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_request()
}

/// Maximum length of an error body kept in [`OverpassError::Status`].
const BODY_PREVIEW_LEN: usize = 300;

/// Overpass reports query syntax errors as an HTML page. Keep only the
/// text of the first `<strong>Error</strong>` paragraph when present, and
/// a bounded preview otherwise.
fn summarize_error_body(body: &str) -> String {
    let text = body
        .find("Error</strong>:")
        .map_or(body, |idx| &body[idx + "Error</strong>:".len()..]);
    let text = text.split("</p>").next().unwrap_or(text).trim();

    if text.len() > BODY_PREVIEW_LEN {
        let mut end = BODY_PREVIEW_LEN;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    fn backoff_saturates() {
        let policy = RetryPolicy::default().with_base_delay(Duration::from_secs(u64::MAX / 2));
        assert_eq!(policy.delay_for(40), Duration::MAX);
    }

    #[test]
    fn summarizes_overpass_html_error() {
        let body = "<html><body><p><strong style=\"color:#FF0000\">Error</strong>: line 2: parse error: ';' expected - ')' found. </p></body></html>";
        assert_eq!(
            summarize_error_body(body),
            "line 2: parse error: ';' expected - ')' found."
        );
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(1000);
        let summary = summarize_error_body(&body);
        assert_eq!(summary.len(), BODY_PREVIEW_LEN + 3);
    }
}
