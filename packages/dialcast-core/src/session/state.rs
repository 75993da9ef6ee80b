//! Session state machine types.
//!
//! The phase enum makes illegal flag combinations unrepresentable: the old
//! "loading" and "paused by user" concerns are carried by the variant itself
//! rather than by independent booleans.

use crate::catalog::Station;
use crate::events::PlaybackState;

use super::playlist::Playlist;

/// Internal playback phase.
///
/// Richer than the public [`PlaybackState`]: `Loading` marks the window in
/// which most engine events are suppressed, `Buffering` is a rebuffer of an
/// already-loaded station, and `Paused` records whether the user asked for
/// the pause (which suppresses stale `Playing` events from the engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No station loaded.
    Idle,
    /// A station load is in flight. The generation identifies which load owns
    /// the window; stale completions compare against the session counter.
    Loading { generation: u64 },
    /// The engine is rebuffering the current station.
    Buffering,
    /// Audio is playing.
    Playing,
    /// Playback is paused. `by_user` is set by an explicit pause command and
    /// cleared once the engine confirms the pause.
    Paused { by_user: bool },
    /// The current station failed and no recovery was possible.
    Error,
}

impl SessionPhase {
    /// Collapses the phase into the public state enum.
    ///
    /// `Buffering` is folded into `Loading`: the presentation layer shows the
    /// same spinner for both.
    #[must_use]
    pub fn public_state(self) -> PlaybackState {
        match self {
            SessionPhase::Idle => PlaybackState::Idle,
            SessionPhase::Loading { .. } | SessionPhase::Buffering => PlaybackState::Loading,
            SessionPhase::Playing => PlaybackState::Playing,
            SessionPhase::Paused { .. } => PlaybackState::Paused,
            SessionPhase::Error => PlaybackState::Error,
        }
    }

    /// Whether the phase is inside the load-suppression window.
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, SessionPhase::Loading { .. })
    }
}

/// The controller's owned mutable state.
///
/// Mutated only under the controller's lock; engine and storage calls never
/// happen while it is held.
#[derive(Debug)]
pub struct Session {
    pub(crate) phase: SessionPhase,
    pub(crate) current_station: Option<Station>,
    pub(crate) playlist: Playlist,
    /// Monotonic load counter. Bumped on every station load and on any
    /// transition that invalidates an in-flight load.
    pub(crate) generation: u64,
    /// Consecutive load failures for the current station, compared against
    /// the configured retry limit before auto-advancing.
    pub(crate) retries_on_current: u32,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            current_station: None,
            playlist: Playlist::new(),
            generation: 0,
            retries_on_current: 0,
        }
    }

    /// Bumps and returns the load generation.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffering_and_loading_collapse_to_public_loading() {
        assert_eq!(
            SessionPhase::Loading { generation: 7 }.public_state(),
            PlaybackState::Loading
        );
        assert_eq!(SessionPhase::Buffering.public_state(), PlaybackState::Loading);
        assert!(SessionPhase::Loading { generation: 7 }.is_loading());
        assert!(!SessionPhase::Buffering.is_loading());
    }

    #[test]
    fn paused_variants_share_public_state() {
        assert_eq!(
            SessionPhase::Paused { by_user: true }.public_state(),
            PlaybackState::Paused
        );
        assert_eq!(
            SessionPhase::Paused { by_user: false }.public_state(),
            PlaybackState::Paused
        );
    }
}
