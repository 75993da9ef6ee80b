//! Centralized error types for the Dialcast core library.
//!
//! Errors are grouped per boundary: [`EngineError`] for the playback engine
//! seam and [`StorageError`] for the persistence store. Neither type crosses
//! the presentation boundary as an exception: commands catch failures at the
//! call site and communicate them through `PlaybackState` and session events.

use thiserror::Error;

/// Errors from the playback engine seam.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `setup` was called on an engine that is already initialized.
    ///
    /// The controller treats this as success, not failure (idempotent init).
    #[error("Engine already initialized")]
    AlreadyInitialized,

    /// Engine setup failed for a reason other than double initialization.
    #[error("Engine setup failed: {0}")]
    Setup(String),

    /// A queue mutation (add/remove/skip) was rejected by the engine.
    #[error("Queue operation failed: {0}")]
    Queue(String),

    /// A queue index was out of range for the engine's current queue.
    #[error("Invalid queue index: {0}")]
    InvalidIndex(usize),

    /// A transport command (play/pause/stop/reset) failed.
    #[error("Transport command failed: {0}")]
    Command(String),
}

impl EngineError {
    /// Returns a machine-readable error code for logs and event payloads.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized => "already_initialized",
            Self::Setup(_) => "setup_failed",
            Self::Queue(_) => "queue_operation_failed",
            Self::InvalidIndex(_) => "invalid_queue_index",
            Self::Command(_) => "transport_command_failed",
        }
    }

    /// True for the "already initialized" setup outcome, which the controller
    /// treats as success.
    #[must_use]
    pub fn is_already_initialized(&self) -> bool {
        matches!(self, Self::AlreadyInitialized)
    }
}

/// Errors from the persistence store seam.
///
/// Always best-effort from the controller's perspective: logged and ignored,
/// never surfaced as a playback state change.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (file store).
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized.
    #[error("Storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Result Type Aliases
// ─────────────────────────────────────────────────────────────────────────────

/// Convenient Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Convenient Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
