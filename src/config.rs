//! Client configuration.
//!
//! Values arrive from the command line or the environment (see `main.rs`);
//! this module turns them into typed settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use canvas::color::Palette;

use crate::sync::{HttpPixelStore, SyncError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub palette: Palette,
    /// `None` means requests never time out.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), palette: Palette::default(), request_timeout: None }
    }
}

impl ClientConfig {
    /// Build from raw option values. A blank palette list selects the
    /// default palette; a timeout of zero seconds disables the timeout.
    #[must_use]
    pub fn new(base_url: &str, palette: Option<&str>, request_timeout_secs: Option<u64>) -> Self {
        Self {
            base_url: base_url.trim().to_owned(),
            palette: palette.map(Palette::parse).unwrap_or_default(),
            request_timeout: request_timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs),
        }
    }

    /// HTTP client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn http_store(&self) -> Result<HttpPixelStore, SyncError> {
        HttpPixelStore::new(&self.base_url, self.request_timeout)
    }
}
