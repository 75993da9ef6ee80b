//! Event system for presentation-layer communication.
//!
//! This module provides:
//! - [`EventEmitter`] trait for the session controller to emit events
//! - Event types describing playback session changes
//!
//! The presentation layer subscribes through an emitter implementation of its
//! choosing (UI bridge, logging, no-op for tests).

mod emitter;

pub use emitter::{EventEmitter, LoggingEventEmitter, NoopEventEmitter};

use serde::{Deserialize, Serialize};

use crate::catalog::Station;

/// Public playback state, the single source of truth for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    /// No station loaded.
    Idle,
    /// A station is loading or the live stream is buffering.
    Loading,
    /// The engine is playing the current station.
    Playing,
    /// Playback is paused.
    Paused,
    /// The last load or playback attempt failed and could not be recovered.
    Error,
}

/// Events emitted by the playback session controller.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// The public playback state changed.
    StateChanged {
        /// The new playback state.
        state: PlaybackState,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The current station changed (or was cleared).
    StationChanged {
        /// The new current station, `None` after `stop()`.
        station: Option<Station>,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// A station failed to load and is treated as off-air.
    ///
    /// Emitted before auto-advancing to the next playlist entry (or entering
    /// the error state when no playlist is available). Intended for a
    /// user-visible toast/alert.
    StationUnavailable {
        /// The station that failed to load.
        station: Station,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The playlist was replaced wholesale.
    PlaylistReplaced {
        /// Number of stations in the new playlist.
        len: usize,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_state_serializes_to_camel_case() {
        assert_eq!(
            serde_json::to_string(&PlaybackState::Loading).unwrap(),
            "\"loading\""
        );
        assert_eq!(
            serde_json::to_string(&PlaybackState::Idle).unwrap(),
            "\"idle\""
        );
    }

    #[test]
    fn session_event_is_tagged() {
        let event = SessionEvent::StateChanged {
            state: PlaybackState::Playing,
            timestamp: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "stateChanged");
        assert_eq!(json["state"], "playing");
        assert_eq!(json["timestamp"], 42);
    }

    #[test]
    fn station_changed_serializes_cleared_station() {
        let event = SessionEvent::StationChanged {
            station: None,
            timestamp: 0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "stationChanged");
        assert!(json["station"].is_null());
    }
}
