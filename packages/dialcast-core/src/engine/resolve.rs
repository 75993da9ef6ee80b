//! Best-effort stream-URL resolution.
//!
//! Some catalog URLs are redirect frontends; the engine handles the audio but
//! behaves better when handed the final endpoint directly. Resolution is a
//! HEAD request following redirects; any failure falls back to the original
//! URL so an unreachable resolver never blocks playback.

use reqwest::Client;

/// Resolves a stream URL to its final redirect target.
///
/// Returns the response's final URL on success, or the original `url` on any
/// request failure (logged at warn level).
pub async fn resolve_stream_url(client: &Client, url: &str) -> String {
    match client.head(url).send().await {
        Ok(response) => {
            let resolved = response.url().to_string();
            if resolved != url {
                log::info!("[Resolve] {} -> {}", url, resolved);
            }
            resolved
        }
        Err(e) => {
            log::warn!("[Resolve] HEAD request for {} failed, using original URL: {}", url, e);
            url.to_string()
        }
    }
}
