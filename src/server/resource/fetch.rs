//! HTTP retrieval of provider resources.

use crate::server::error::sync::SyncError;

/// Retrieves provider resources over HTTP.
///
/// The timeout and user agent are configured on the shared `reqwest::Client` at startup.
pub struct ResourceFetcher<'a> {
    client: &'a reqwest::Client,
}

impl<'a> ResourceFetcher<'a> {
    /// Creates a new instance of [`ResourceFetcher`]
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetches the raw bytes of the resource at `url`.
    ///
    /// No retry is attempted; a failed fetch waits for the next scheduled sync.
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)` - Body of a 2xx response
    /// - `Err(SyncError::UpstreamUnavailable)` - Non-2xx status, or the request failed to
    ///   connect, timed out or was interrupted while reading the body
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let unavailable = |reason: String| SyncError::UpstreamUnavailable {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP status {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(describe_transport_error(&e)))?;

        tracing::debug!("Fetched {} byte(s) from {}", body.len(), url);

        Ok(body.to_vec())
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}
