//! Dialcast Core - shared library for Dialcast.
//!
//! This crate provides the core functionality for Dialcast, a live internet
//! radio client. It owns the playback session: mapping user intent to an
//! external streaming engine, reconciling the engine's asynchronous events
//! into a small public state, navigating the playlist as an infinite loop,
//! and persisting the session across restarts.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`runtime`]: Task spawning abstraction for async runtime independence
//! - [`events`]: Session events delivered to the presentation layer
//! - [`engine`]: Playback engine seam (trait, wire types, mock)
//! - [`session`]: The playback session controller and its state machine
//! - [`catalog`]: Bundled station catalog
//! - [`storage`]: Key-value session persistence
//! - [`favorites`] / [`ordering`]: Persisted user preferences
//! - [`m3u`]: Playlist import/export
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! Core logic is decoupled from platform bindings through traits:
//!
//! - [`PlaybackEngine`](engine::PlaybackEngine): The streaming engine
//! - [`SessionStore`](storage::SessionStore): Key-value persistence
//! - [`EventEmitter`](events::EventEmitter): Emitting session events
//! - [`TaskSpawner`](runtime::TaskSpawner): Spawning background tasks
//!
//! Each trait ships with a default or in-memory implementation; platform
//! apps provide their own bindings.

#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod favorites;
pub mod m3u;
pub mod ordering;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod utils;

// Re-export commonly used types at the crate root
pub use catalog::{Station, StationCatalog};
pub use config::SessionConfig;
pub use engine::{
    Capability, CapabilitySet, EngineConfig, EngineEvent, EngineState, MockEngine, PlaybackEngine,
    RemoteCommand, Track,
};
pub use error::{EngineError, EngineResult, StorageError, StorageResult};
pub use events::{EventEmitter, LoggingEventEmitter, NoopEventEmitter, PlaybackState, SessionEvent};
pub use favorites::Favorites;
pub use ordering::StationOrder;
pub use runtime::{TaskSpawner, TokioSpawner};
pub use session::{Playlist, Session, SessionController, SessionPhase};
pub use storage::{FileStore, MemoryStore, SessionStore};
