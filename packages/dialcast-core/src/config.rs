//! Session controller configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the playback session controller.
///
/// All fields have sensible defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    /// How many times a failing station is retried before auto-advancing to
    /// the next playlist entry. 0 means advance immediately on the first
    /// load error (the default behavior).
    pub error_retry_limit: u32,

    /// Resolve stream URLs through a HEAD request before handing them to the
    /// engine, following redirects to the final endpoint. Falls back to the
    /// original URL on any failure. Disable for offline tests.
    pub resolve_stream_urls: bool,

    /// Timeout for stream-URL resolution requests (seconds).
    pub resolve_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            error_retry_limit: 0,
            resolve_stream_urls: true,
            resolve_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_advances_immediately_on_error() {
        let config = SessionConfig::default();
        assert_eq!(config.error_retry_limit, 0);
        assert!(config.resolve_stream_urls);
    }
}
