//! Event emitter abstraction for decoupling the controller from transport.
//!
//! The session controller depends on the [`EventEmitter`] trait rather than a
//! concrete channel or UI bridge, enabling testing and alternative transport
//! implementations.

use super::SessionEvent;

/// Trait for emitting session events without knowledge of transport.
///
/// The presentation layer decides how events reach the user (UI state update,
/// notification, toast). The controller only emits.
pub trait EventEmitter: Send + Sync {
    /// Emits a playback session event.
    fn emit_session(&self, event: SessionEvent);
}

/// No-op emitter for tests and headless use.
///
/// Events are silently discarded.
pub struct NoopEventEmitter;

impl EventEmitter for NoopEventEmitter {
    fn emit_session(&self, _event: SessionEvent) {
        // No-op
    }
}

/// Logging emitter for debugging and development.
///
/// Logs all events at debug level.
pub struct LoggingEventEmitter;

impl EventEmitter for LoggingEventEmitter {
    fn emit_session(&self, event: SessionEvent) {
        tracing::debug!(?event, "session_event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PlaybackState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Test emitter that counts events.
    struct CountingEventEmitter {
        count: AtomicUsize,
    }

    impl EventEmitter for CountingEventEmitter {
        fn emit_session(&self, _event: SessionEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn counting_emitter_tracks_events() {
        let emitter = Arc::new(CountingEventEmitter {
            count: AtomicUsize::new(0),
        });

        emitter.emit_session(SessionEvent::StateChanged {
            state: PlaybackState::Idle,
            timestamp: 0,
        });
        emitter.emit_session(SessionEvent::PlaylistReplaced {
            len: 3,
            timestamp: 0,
        });

        assert_eq!(emitter.count.load(Ordering::SeqCst), 2);
    }
}
