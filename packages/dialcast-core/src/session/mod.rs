//! Playback session: state machine, playlist cursor, and controller.

mod controller;
mod playlist;
mod state;

pub use controller::SessionController;
pub use playlist::Playlist;
pub use state::{Session, SessionPhase};
