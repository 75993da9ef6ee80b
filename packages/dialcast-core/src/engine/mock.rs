//! Scriptable in-memory playback engine.
//!
//! Always compiled so downstream crates can drive the controller without a
//! real streaming backend. The mock records every command it receives, keeps
//! a faithful queue simulation, and exposes [`MockEngine::emit`] for
//! injecting engine events as a platform binding would.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::{EngineError, EngineResult};

use super::traits::{CapabilitySet, EngineConfig, PlaybackEngine};
use super::types::{EngineEvent, Track};

/// A recorded engine command, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCommand {
    Setup,
    UpdateCapabilities,
    /// `add` with the track's URL.
    Add(String),
    Remove(usize),
    Skip(usize),
    Play,
    Pause,
    Stop,
    Reset,
}

#[derive(Default)]
struct MockState {
    commands: Vec<MockCommand>,
    queue: Vec<Track>,
    active: Option<usize>,
    fail_next_setup: Option<EngineError>,
    fail_next_add: VecDeque<EngineError>,
}

/// In-memory [`PlaybackEngine`] for tests.
pub struct MockEngine {
    state: Mutex<MockState>,
    setup_done: AtomicBool,
    events: mpsc::Sender<EngineEvent>,
}

impl MockEngine {
    /// Creates a mock engine and the event stream the controller consumes.
    pub fn new() -> (Arc<Self>, mpsc::Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel(32);
        let engine = Arc::new(Self {
            state: Mutex::new(MockState::default()),
            setup_done: AtomicBool::new(false),
            events: tx,
        });
        (engine, rx)
    }

    /// Injects an engine event, as a platform binding would deliver it.
    pub async fn emit(&self, event: EngineEvent) {
        self.events
            .send(event)
            .await
            .expect("event receiver dropped");
    }

    /// Queues an error for the next `setup` call.
    pub fn fail_next_setup(&self, error: EngineError) {
        self.state.lock().fail_next_setup = Some(error);
    }

    /// Queues an error for the next `add` call.
    pub fn fail_next_add(&self, error: EngineError) {
        self.state.lock().fail_next_add.push_back(error);
    }

    /// Returns all commands received so far.
    pub fn commands(&self) -> Vec<MockCommand> {
        self.state.lock().commands.clone()
    }

    /// Returns the commands received since the last call to this method.
    pub fn take_commands(&self) -> Vec<MockCommand> {
        std::mem::take(&mut self.state.lock().commands)
    }

    /// Returns the index of the active queue position, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.state.lock().active
    }

    fn record(&self, command: MockCommand) {
        self.state.lock().commands.push(command);
    }
}

#[async_trait]
impl PlaybackEngine for MockEngine {
    async fn setup(&self, _config: &EngineConfig) -> EngineResult<()> {
        self.record(MockCommand::Setup);
        if let Some(error) = self.state.lock().fail_next_setup.take() {
            return Err(error);
        }
        if self.setup_done.swap(true, Ordering::SeqCst) {
            return Err(EngineError::AlreadyInitialized);
        }
        Ok(())
    }

    async fn update_capabilities(&self, _capabilities: &CapabilitySet) -> EngineResult<()> {
        self.record(MockCommand::UpdateCapabilities);
        Ok(())
    }

    async fn add(&self, track: Track) -> EngineResult<()> {
        let mut state = self.state.lock();
        state.commands.push(MockCommand::Add(track.url.clone()));
        if let Some(error) = state.fail_next_add.pop_front() {
            return Err(error);
        }
        state.queue.push(track);
        if state.active.is_none() {
            state.active = Some(state.queue.len() - 1);
        }
        Ok(())
    }

    async fn remove(&self, index: usize) -> EngineResult<()> {
        let mut state = self.state.lock();
        state.commands.push(MockCommand::Remove(index));
        if index >= state.queue.len() {
            return Err(EngineError::InvalidIndex(index));
        }
        state.queue.remove(index);
        state.active = match state.active {
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => None,
            other => other,
        };
        Ok(())
    }

    async fn skip(&self, index: usize) -> EngineResult<()> {
        let mut state = self.state.lock();
        state.commands.push(MockCommand::Skip(index));
        if index >= state.queue.len() {
            return Err(EngineError::InvalidIndex(index));
        }
        state.active = Some(index);
        Ok(())
    }

    async fn queue(&self) -> EngineResult<Vec<Track>> {
        Ok(self.state.lock().queue.clone())
    }

    async fn play(&self) -> EngineResult<()> {
        self.record(MockCommand::Play);
        Ok(())
    }

    async fn pause(&self) -> EngineResult<()> {
        self.record(MockCommand::Pause);
        Ok(())
    }

    async fn stop(&self) -> EngineResult<()> {
        self.record(MockCommand::Stop);
        Ok(())
    }

    async fn reset(&self) -> EngineResult<()> {
        let mut state = self.state.lock();
        state.commands.push(MockCommand::Reset);
        state.queue.clear();
        state.active = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Station;

    fn track(url: &str) -> Track {
        let station = Station {
            id: url.to_string(),
            name: url.to_string(),
            stream_url: url.to_string(),
            category: "TEST".to_string(),
            genre: None,
            artist: None,
            artwork: None,
        };
        Track::for_station(&station, url)
    }

    #[tokio::test]
    async fn second_setup_reports_already_initialized() {
        let (engine, _rx) = MockEngine::new();
        engine.setup(&EngineConfig::default()).await.unwrap();
        let err = engine.setup(&EngineConfig::default()).await.unwrap_err();
        assert!(err.is_already_initialized());
    }

    #[tokio::test]
    async fn queue_simulation_tracks_active_index() {
        let (engine, _rx) = MockEngine::new();
        engine.add(track("a")).await.unwrap();
        engine.add(track("b")).await.unwrap();
        assert_eq!(engine.active_index(), Some(0));

        engine.skip(1).await.unwrap();
        engine.remove(0).await.unwrap();
        assert_eq!(engine.active_index(), Some(0));
        assert_eq!(engine.queue().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fail_next_add_returns_queued_error() {
        let (engine, _rx) = MockEngine::new();
        engine.fail_next_add(EngineError::Queue("full".to_string()));
        assert!(engine.add(track("a")).await.is_err());
        assert!(engine.add(track("b")).await.is_ok());
        assert_eq!(
            engine.take_commands(),
            vec![
                MockCommand::Add("a".to_string()),
                MockCommand::Add("b".to_string()),
            ]
        );
    }
}
