//! HTTP pixel store client.
//!
//! Thin wrapper over `GET`/`POST`/`DELETE {base}/api/pixels`. Response
//! decoding is split into pure functions for testability.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use canvas::grid::Pixel;
use reqwest::Url;
use tracing::debug;

use super::{PixelStore, SyncError};

const PIXELS_PATH: &str = "api/pixels";
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpPixelStore {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpPixelStore {
    /// Build a client for the store at `base_url`.
    ///
    /// `request_timeout` of `None` leaves requests unbounded; a stalled
    /// request then simply never completes.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client fails to build.
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self, SyncError> {
        let endpoint = pixels_endpoint(base_url)?;
        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| SyncError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, SyncError> {
        let response = request.send().await.map_err(|e| SyncError::Request(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| SyncError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(SyncError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl PixelStore for HttpPixelStore {
    async fn fetch_all(&self) -> Result<Vec<Pixel>, SyncError> {
        let text = self.send(self.http.get(self.endpoint.clone())).await?;
        let pixels = parse_pixels(&text)?;
        debug!(count = pixels.len(), "fetched pixels");
        Ok(pixels)
    }

    async fn upsert(&self, pixel: &Pixel) -> Result<(), SyncError> {
        self.send(self.http.post(self.endpoint.clone()).json(pixel)).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SyncError> {
        self.send(self.http.delete(self.endpoint.clone())).await?;
        Ok(())
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Resolve `{base_url}/api/pixels`, keeping any path prefix on the base.
pub(crate) fn pixels_endpoint(base_url: &str) -> Result<Url, SyncError> {
    let mut base = Url::parse(base_url.trim()).map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(SyncError::InvalidBaseUrl(format!("{base_url}: scheme must be http or https")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PIXELS_PATH).map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))
}

/// Decode a `GET /api/pixels` body.
pub(crate) fn parse_pixels(body: &str) -> Result<Vec<Pixel>, SyncError> {
    // Some stores answer an empty grid with an empty body.
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| SyncError::Decode(e.to_string()))
}
