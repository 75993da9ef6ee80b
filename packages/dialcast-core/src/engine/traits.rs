//! Trait abstraction for the playback engine.
//!
//! The trait enables dependency injection for testability: the session
//! controller depends on [`PlaybackEngine`] rather than a concrete engine
//! binding, and the test suite substitutes [`MockEngine`](super::MockEngine).

use async_trait::async_trait;

use crate::error::EngineResult;

use super::types::Track;

/// Media-control capabilities registered with the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Play button.
    Play,
    /// Pause button.
    Pause,
    /// Skip-to-next button.
    SkipToNext,
    /// Skip-to-previous button.
    SkipToPrevious,
    /// Stop button.
    Stop,
}

/// Capability registration for full and compact (collapsed notification)
/// media-control layouts.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    /// Capabilities for the expanded media-control surface.
    pub capabilities: Vec<Capability>,
    /// Capabilities for the compact notification layout.
    pub compact: Vec<Capability>,
}

impl CapabilitySet {
    /// The standard media-control layout for a live-radio session:
    /// full transport controls expanded, play/pause/next when compact.
    #[must_use]
    pub fn media_controls() -> Self {
        Self {
            capabilities: vec![
                Capability::Play,
                Capability::Pause,
                Capability::SkipToNext,
                Capability::SkipToPrevious,
                Capability::Stop,
            ],
            compact: vec![Capability::Play, Capability::Pause, Capability::SkipToNext],
        }
    }
}

/// Engine setup options.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Keep the playback service alive when the hosting app is killed.
    pub continue_in_background: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            continue_in_background: true,
        }
    }
}

/// Trait for the external streaming engine.
///
/// All operations are asynchronous and resolve when the engine acknowledges
/// the command. Queue indices are positions in the engine's single playback
/// queue, of which the session controller is the sole mutator.
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    /// Initializes the engine.
    ///
    /// Idempotent from the controller's perspective: an
    /// [`EngineError::AlreadyInitialized`](crate::error::EngineError::AlreadyInitialized)
    /// result is treated as success.
    async fn setup(&self, config: &EngineConfig) -> EngineResult<()>;

    /// Registers media-control capabilities.
    async fn update_capabilities(&self, capabilities: &CapabilitySet) -> EngineResult<()>;

    /// Appends a track to the end of the queue.
    async fn add(&self, track: Track) -> EngineResult<()>;

    /// Removes the track at `index` from the queue.
    async fn remove(&self, index: usize) -> EngineResult<()>;

    /// Moves the active position to the track at `index`.
    async fn skip(&self, index: usize) -> EngineResult<()>;

    /// Returns the current queue contents.
    async fn queue(&self) -> EngineResult<Vec<Track>>;

    /// Starts or resumes playback of the active track.
    async fn play(&self) -> EngineResult<()>;

    /// Pauses playback.
    async fn pause(&self) -> EngineResult<()>;

    /// Stops playback.
    async fn stop(&self) -> EngineResult<()>;

    /// Stops playback and clears the queue.
    async fn reset(&self) -> EngineResult<()>;
}
