//! Playback engine seam.
//!
//! The external streaming engine (HLS decoding, buffering, audio focus,
//! lock-screen integration) sits behind the [`PlaybackEngine`] trait. The
//! controller only ever talks to this trait and consumes the engine's
//! asynchronous event stream; everything platform-specific lives in the
//! engine implementation.

pub mod mock;
mod resolve;
mod traits;
mod types;

pub use mock::{MockCommand, MockEngine};
pub use resolve::resolve_stream_url;
pub use traits::{Capability, CapabilitySet, EngineConfig, PlaybackEngine};
pub use types::{EngineEvent, EngineState, RemoteCommand, Track};
