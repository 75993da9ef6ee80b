//! Wire types for the playback engine seam.

use serde::{Deserialize, Serialize};

use crate::catalog::Station;

/// MIME type handed to the engine for HLS live streams.
const HLS_MIME_TYPE: &str = "application/x-mpegURL";

/// A queue entry handed to the playback engine.
///
/// Carries the metadata the engine mirrors to lock-screen / notification
/// media controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stream endpoint (possibly redirect-resolved).
    pub url: String,
    /// Title shown in media controls.
    pub title: String,
    /// Artist shown in media controls.
    pub artist: String,
    /// Artwork URL for media controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    /// Live streams are unseekable; the engine disables scrubbing.
    pub is_live_stream: bool,
    /// Content type hint for the engine's demuxer.
    pub mime_type: String,
}

impl Track {
    /// Builds a track for a station, using `url` as the (possibly resolved)
    /// stream endpoint.
    #[must_use]
    pub fn for_station(station: &Station, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: station.name.clone(),
            artist: station
                .artist
                .clone()
                .unwrap_or_else(|| "Live Radio".to_string()),
            artwork: station.artwork.clone(),
            is_live_stream: true,
            mime_type: HLS_MIME_TYPE.to_string(),
        }
    }
}

/// Playback states reported by the engine's state stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineState {
    /// The queued track is ready to play.
    Ready,
    /// The engine is filling its buffer.
    Buffering,
    /// The engine is loading the track source.
    Loading,
    /// Audio is being produced.
    Playing,
    /// Playback is paused.
    Paused,
    /// Playback stopped and the queue position was discarded.
    Stopped,
    /// The track failed to load or play.
    Error,
}

/// Hardware / lock-screen media-control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Remote play button.
    Play,
    /// Remote pause button.
    Pause,
    /// Remote stop.
    Stop,
    /// Remote skip-to-next.
    Next,
    /// Remote skip-to-previous.
    Previous,
}

/// Events delivered on the engine's asynchronous event stream.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Playback state change.
    State(EngineState),
    /// Dedicated playback error report (logged; state transitions come from
    /// the state stream's `Error` value).
    Error {
        /// Machine-readable error code from the engine.
        code: String,
        /// Human-readable description.
        message: String,
    },
    /// Hardware / lock-screen control event.
    Remote(RemoteCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> Station {
        Station {
            id: "s1".to_string(),
            name: "Test FM".to_string(),
            stream_url: "https://radio.example/live".to_string(),
            category: "TEST".to_string(),
            genre: None,
            artist: None,
            artwork: Some("https://radio.example/art.png".to_string()),
        }
    }

    #[test]
    fn track_defaults_artist_to_live_radio() {
        let track = Track::for_station(&station(), "https://resolved.example/live");
        assert_eq!(track.artist, "Live Radio");
        assert_eq!(track.url, "https://resolved.example/live");
        assert!(track.is_live_stream);
        assert_eq!(track.mime_type, "application/x-mpegURL");
    }

    #[test]
    fn track_uses_station_artist_when_present() {
        let mut s = station();
        s.artist = Some("KBS".to_string());
        let track = Track::for_station(&s, s.stream_url.clone());
        assert_eq!(track.artist, "KBS");
        assert_eq!(track.artwork.as_deref(), Some("https://radio.example/art.png"));
    }
}
