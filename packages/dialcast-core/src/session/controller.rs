//! Playback session controller.
//!
//! Responsibilities:
//! - Mapping user intent (play, pause, skip) to engine commands
//! - Reconciling the engine's asynchronous event stream into the public
//!   playback state
//! - Auto-advancing through the playlist when a station fails to load
//! - Persisting and restoring the session across process restarts
//!
//! The controller is the sole mutator of the engine's playback queue and the
//! sole writer of the session's persistence keys.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use crate::catalog::Station;
use crate::config::SessionConfig;
use crate::engine::{
    resolve_stream_url, CapabilitySet, EngineConfig, EngineEvent, EngineState, PlaybackEngine,
    RemoteCommand, Track,
};
use crate::error::EngineResult;
use crate::events::{EventEmitter, PlaybackState, SessionEvent};
use crate::runtime::{TaskSpawner, TokioSpawner};
use crate::storage::{keys, SessionStore};
use crate::utils::now_millis;

use super::state::{Session, SessionPhase};

/// Engine work decided by the reconciler while the session lock was held,
/// executed after release.
enum FollowUp {
    None,
    /// A loading station reported ready; start playback.
    StartPlayback,
    /// Load `station` into the engine queue (retry or auto-advance target).
    LoadStation { station: Station, generation: u64 },
}

/// Coordinates user intent, the playback engine, and persistence.
///
/// Commands issued before [`initialize`](Self::initialize) completes await
/// initialization instead of failing. Engine events are reconciled through
/// [`handle_engine_event`](Self::handle_engine_event), fed either directly
/// (tests, custom bindings) or by the pump started with
/// [`start_event_pump`](Self::start_event_pump).
pub struct SessionController {
    engine: Arc<dyn PlaybackEngine>,
    store: Arc<dyn SessionStore>,
    emitter: Arc<dyn EventEmitter>,
    config: SessionConfig,
    session: Mutex<Session>,
    engine_rx: Mutex<Option<mpsc::Receiver<EngineEvent>>>,
    init_tx: watch::Sender<bool>,
    init_rx: watch::Receiver<bool>,
    player_ready: AtomicBool,
    http: Option<reqwest::Client>,
}

impl SessionController {
    /// Creates a controller consuming `engine_rx` as the engine event stream.
    pub fn new(
        engine: Arc<dyn PlaybackEngine>,
        store: Arc<dyn SessionStore>,
        emitter: Arc<dyn EventEmitter>,
        engine_rx: mpsc::Receiver<EngineEvent>,
        config: SessionConfig,
    ) -> Self {
        let (init_tx, init_rx) = watch::channel(false);
        let http = if config.resolve_stream_urls {
            reqwest::Client::builder()
                .timeout(Duration::from_secs(config.resolve_timeout_secs))
                .build()
                .map_err(|e| log::warn!("[Session] HTTP client unavailable, skipping URL resolution: {}", e))
                .ok()
        } else {
            None
        };
        Self {
            engine,
            store,
            emitter,
            config,
            session: Mutex::new(Session::new()),
            engine_rx: Mutex::new(Some(engine_rx)),
            init_tx,
            init_rx,
            player_ready: AtomicBool::new(false),
            http,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────

    /// Initializes the engine and rehydrates persisted session state.
    ///
    /// Idempotent: an engine reporting "already initialized" counts as
    /// success. A restored station is queued paused, never auto-played.
    /// Completion is signalled to waiting commands whether or not setup
    /// succeeded.
    pub async fn initialize(&self) {
        match self.engine.setup(&EngineConfig::default()).await {
            Ok(()) => self.player_ready.store(true, Ordering::SeqCst),
            Err(e) if e.is_already_initialized() => {
                log::info!("[Session] Engine already initialized");
                self.player_ready.store(true, Ordering::SeqCst);
            }
            Err(e) => log::error!("[Session] Engine setup failed: {}", e),
        }

        if self.player_ready.load(Ordering::SeqCst) {
            if let Err(e) = self
                .engine
                .update_capabilities(&CapabilitySet::media_controls())
                .await
            {
                log::warn!("[Session] Failed to register media controls: {}", e);
            }
            self.restore_session().await;
        }

        let _ = self.init_tx.send(true);
    }

    /// Spawns the task that drains the engine event stream into the
    /// reconciler. Draining stops when the engine drops its sender.
    ///
    /// Must be called inside a runtime context; hosts with their own runtime
    /// can drain the receiver themselves via [`handle_engine_event`](Self::handle_engine_event).
    pub fn start_event_pump(self: &Arc<Self>) {
        self.start_event_pump_on(&TokioSpawner::current());
    }

    /// Like [`start_event_pump`](Self::start_event_pump) with an explicit spawner.
    pub fn start_event_pump_on(self: &Arc<Self>, spawner: &impl TaskSpawner) {
        let controller = Arc::clone(self);
        spawner.spawn(async move {
            let rx = controller.engine_rx.lock().take();
            if let Some(mut rx) = rx {
                while let Some(event) = rx.recv().await {
                    controller.handle_engine_event(event).await;
                }
            }
        });
    }

    async fn restore_session(&self) {
        match self.store.get(keys::PLAYLIST).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Station>>(&raw) {
                Ok(stations) if !stations.is_empty() => {
                    self.session.lock().playlist.replace(stations);
                }
                Ok(_) => {}
                Err(e) => log::warn!("[Session] Ignoring corrupt playlist data: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("[Session] Failed to load playlist: {}", e),
        }

        let station = match self.store.get(keys::CURRENT_STATION).await {
            Ok(Some(raw)) => match serde_json::from_str::<Station>(&raw) {
                Ok(station) => Some(station),
                Err(e) => {
                    log::warn!("[Session] Ignoring corrupt station data: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("[Session] Failed to load station: {}", e);
                None
            }
        };

        if let Some(station) = station {
            let track = Track::for_station(&station, station.stream_url.clone());
            if let Err(e) = self.engine.add(track).await {
                log::warn!("[Session] Failed to restore {} into engine queue: {}", station.id, e);
                return;
            }
            {
                let mut session = self.session.lock();
                session.current_station = Some(station.clone());
                session.phase = SessionPhase::Paused { by_user: false };
            }
            log::info!("[Session] Restored station {} (paused)", station.id);
            self.emit_station(Some(station));
            self.emit_state(PlaybackState::Paused);
        }
    }

    async fn wait_ready(&self) {
        let mut rx = self.init_rx.clone();
        // The sender lives in self, so this cannot error.
        let _ = rx.wait_for(|done| *done).await;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────

    /// Loads `station` and starts playback once the engine reports ready.
    ///
    /// The engine queue is swapped atomically (add new, skip to it, remove
    /// the old entries) so media-control metadata never goes blank between
    /// stations. Playback start is deferred to the reconciler.
    pub async fn play(&self, station: Station) {
        self.wait_ready().await;
        if !self.player_ready.load(Ordering::SeqCst) {
            log::warn!("[Session] Engine not ready, ignoring play for {}", station.id);
            return;
        }

        let (generation, state_changed) = {
            let mut session = self.session.lock();
            let before = session.phase.public_state();
            let generation = session.next_generation();
            session.retries_on_current = 0;
            session.phase = SessionPhase::Loading { generation };
            session.current_station = Some(station.clone());
            (generation, before != PlaybackState::Loading)
        };
        log::info!("[Session] Playing station {}", station.id);
        self.emit_station(Some(station.clone()));
        if state_changed {
            self.emit_state(PlaybackState::Loading);
        }

        self.load_station(station, generation).await;
    }

    /// Pauses playback.
    ///
    /// The state flips to paused optimistically, ahead of engine
    /// confirmation, so the UI responds instantly. An in-flight load is
    /// abandoned.
    pub async fn pause(&self) {
        self.wait_ready().await;
        let state_changed = {
            let mut session = self.session.lock();
            let before = session.phase.public_state();
            session.phase = SessionPhase::Paused { by_user: true };
            before != PlaybackState::Paused
        };
        if state_changed {
            self.emit_state(PlaybackState::Paused);
        }
        if let Err(e) = self.engine.pause().await {
            log::warn!("[Session] Engine pause failed: {}", e);
        }
    }

    /// Resumes the paused station. The state transitions to playing only
    /// once the engine confirms.
    pub async fn resume(&self) {
        self.wait_ready().await;
        {
            let mut session = self.session.lock();
            if session.current_station.is_none() {
                return;
            }
            session.phase = SessionPhase::Paused { by_user: false };
        }
        if let Err(e) = self.engine.play().await {
            log::warn!("[Session] Engine play failed: {}", e);
        }
    }

    /// Stops playback and unloads the station. Persisted state is kept so
    /// the session still rehydrates after a restart.
    pub async fn stop(&self) {
        self.wait_ready().await;
        let had_station = {
            let mut session = self.session.lock();
            session.next_generation();
            session.phase = SessionPhase::Idle;
            session.retries_on_current = 0;
            session.current_station.take().is_some()
        };
        if had_station {
            self.emit_station(None);
        }
        self.emit_state(PlaybackState::Idle);
        if let Err(e) = self.engine.stop().await {
            log::warn!("[Session] Engine stop failed: {}", e);
        }
        if let Err(e) = self.engine.reset().await {
            log::warn!("[Session] Engine reset failed: {}", e);
        }
    }

    /// Pause/resume toggle for the current station; any other station is
    /// simply played.
    pub async fn toggle_play_pause(&self, station: Station) {
        let is_current = {
            let session = self.session.lock();
            session
                .current_station
                .as_ref()
                .is_some_and(|current| current.id == station.id)
        };
        if !is_current {
            return self.play(station).await;
        }
        match self.playback_state() {
            PlaybackState::Playing | PlaybackState::Loading => self.pause().await,
            PlaybackState::Paused => self.resume().await,
            PlaybackState::Idle | PlaybackState::Error => self.play(station).await,
        }
    }

    /// Replaces the playlist wholesale. Non-empty playlists are persisted;
    /// an empty replacement leaves the stored playlist untouched.
    pub async fn set_playlist(&self, stations: Vec<Station>) {
        let len = stations.len();
        self.session.lock().playlist.replace(stations.clone());
        self.emitter.emit_session(SessionEvent::PlaylistReplaced {
            len,
            timestamp: now_millis(),
        });
        if !stations.is_empty() {
            self.persist_playlist(&stations).await;
        }
    }

    /// Plays the next playlist station, wrapping from the end to the start.
    /// No-op on an empty playlist.
    pub async fn play_next(&self) {
        let target = {
            let session = self.session.lock();
            let current_id = session.current_station.as_ref().map(|s| s.id.clone());
            session.playlist.next_from(current_id.as_deref())
        };
        if let Some(station) = target {
            self.play(station).await;
        }
    }

    /// Plays the previous playlist station, wrapping from the start to the
    /// end. No-op on an empty playlist.
    pub async fn play_previous(&self) {
        let target = {
            let session = self.session.lock();
            let current_id = session.current_station.as_ref().map(|s| s.id.clone());
            session.playlist.previous_from(current_id.as_deref())
        };
        if let Some(station) = target {
            self.play(station).await;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────

    /// The station currently loaded into the engine, if any.
    #[must_use]
    pub fn current_station(&self) -> Option<Station> {
        self.session.lock().current_station.clone()
    }

    /// The public playback state.
    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.session.lock().phase.public_state()
    }

    /// The active playlist.
    #[must_use]
    pub fn playlist(&self) -> Vec<Station> {
        self.session.lock().playlist.stations().to_vec()
    }

    /// Whether `play_next` would do anything. Navigation wraps, so this is
    /// simply playlist non-emptiness.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.session.lock().playlist.is_empty()
    }

    /// Whether `play_previous` would do anything.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        !self.session.lock().playlist.is_empty()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback_state() == PlaybackState::Playing
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event reconciliation
    // ─────────────────────────────────────────────────────────────────────

    /// Reconciles one engine event into the session.
    ///
    /// Remote-control events route to the command API; error reports are
    /// logged (state transitions come from the state stream); state events
    /// drive the state machine.
    pub async fn handle_engine_event(&self, event: EngineEvent) {
        match event {
            EngineEvent::Remote(command) => self.handle_remote(command).await,
            EngineEvent::Error { code, message } => {
                log::error!("[Session] Engine playback error {}: {}", code, message);
            }
            EngineEvent::State(state) => self.reconcile_state(state).await,
        }
    }

    async fn handle_remote(&self, command: RemoteCommand) {
        tracing::debug!(?command, "remote_command");
        match command {
            RemoteCommand::Play => self.resume().await,
            RemoteCommand::Pause => self.pause().await,
            RemoteCommand::Stop => self.stop().await,
            RemoteCommand::Next => self.play_next().await,
            RemoteCommand::Previous => self.play_previous().await,
        }
    }

    async fn reconcile_state(&self, engine_state: EngineState) {
        tracing::debug!(?engine_state, "engine_state");
        let (events, follow_up) = {
            let mut session = self.session.lock();
            self.reconcile_locked(&mut session, engine_state)
        };
        for event in events {
            self.emitter.emit_session(event);
        }
        self.run_follow_up(follow_up).await;
    }

    /// Core state-machine step. Runs under the session lock; engine and
    /// storage work is returned as a [`FollowUp`] and executed afterwards.
    fn reconcile_locked(
        &self,
        session: &mut Session,
        engine_state: EngineState,
    ) -> (Vec<SessionEvent>, FollowUp) {
        let mut events = Vec::new();
        let mut follow_up = FollowUp::None;
        let before = session.phase.public_state();

        let current = match session.current_station.clone() {
            Some(current) => current,
            None => {
                // No station loaded: every engine event collapses to idle.
                session.phase = SessionPhase::Idle;
                push_state_change(&mut events, before, session.phase.public_state());
                return (events, follow_up);
            }
        };

        if session.phase.is_loading() {
            // Load-suppression window: only ready and error are acted on;
            // everything else would just flicker the UI.
            match engine_state {
                EngineState::Ready => {
                    session.phase = SessionPhase::Playing;
                    session.retries_on_current = 0;
                    follow_up = FollowUp::StartPlayback;
                }
                EngineState::Error => {
                    log::warn!("[Session] Station {} failed to load", current.id);
                    if session.playlist.is_empty() {
                        session.phase = SessionPhase::Error;
                    } else if session.retries_on_current < self.config.error_retry_limit {
                        session.retries_on_current += 1;
                        let generation = session.next_generation();
                        session.phase = SessionPhase::Loading { generation };
                        log::info!(
                            "[Session] Retrying {} ({}/{})",
                            current.id,
                            session.retries_on_current,
                            self.config.error_retry_limit
                        );
                        follow_up = FollowUp::LoadStation {
                            station: current,
                            generation,
                        };
                    } else if let Some(target) = session.playlist.next_from(Some(&current.id)) {
                        log::info!(
                            "[Session] Auto-advancing from {} to {}",
                            current.id,
                            target.id
                        );
                        session.retries_on_current = 0;
                        let generation = session.next_generation();
                        session.phase = SessionPhase::Loading { generation };
                        session.current_station = Some(target.clone());
                        events.push(SessionEvent::StationUnavailable {
                            station: current,
                            timestamp: now_millis(),
                        });
                        events.push(SessionEvent::StationChanged {
                            station: Some(target.clone()),
                            timestamp: now_millis(),
                        });
                        follow_up = FollowUp::LoadStation {
                            station: target,
                            generation,
                        };
                    }
                }
                _ => {}
            }
        } else {
            match engine_state {
                EngineState::Playing => {
                    // A playing event racing an explicit pause is stale.
                    if !matches!(session.phase, SessionPhase::Paused { by_user: true }) {
                        session.phase = SessionPhase::Playing;
                    }
                }
                EngineState::Paused => {
                    session.phase = SessionPhase::Paused { by_user: false };
                }
                EngineState::Buffering | EngineState::Loading => {
                    session.phase = SessionPhase::Buffering;
                }
                EngineState::Stopped => {
                    session.next_generation();
                    session.phase = SessionPhase::Idle;
                    session.current_station = None;
                    events.push(SessionEvent::StationChanged {
                        station: None,
                        timestamp: now_millis(),
                    });
                }
                EngineState::Error => {
                    session.phase = SessionPhase::Error;
                }
                EngineState::Ready => {}
            }
        }

        push_state_change(&mut events, before, session.phase.public_state());
        (events, follow_up)
    }

    async fn run_follow_up(&self, follow_up: FollowUp) {
        match follow_up {
            FollowUp::None => {}
            FollowUp::StartPlayback => {
                if let Err(e) = self.engine.play().await {
                    log::warn!("[Session] Failed to start playback: {}", e);
                }
            }
            FollowUp::LoadStation {
                station,
                generation,
            } => {
                self.load_station(station, generation).await;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Engine queue management
    // ─────────────────────────────────────────────────────────────────────

    /// Persists, resolves, and swaps `station` into the engine queue.
    ///
    /// Every suspension point re-checks `generation` so a newer load that
    /// started meanwhile wins; this makes rapid station switches
    /// deterministic instead of interleaving queue mutations.
    async fn load_station(&self, station: Station, generation: u64) {
        self.persist_current_station(&station).await;

        let url = self.resolve_url(&station).await;
        if self.session.lock().generation != generation {
            return;
        }

        let track = Track::for_station(&station, url);
        if let Err(e) = self.swap_queue(track).await {
            log::error!("[Session] Queue swap failed for {}: {}", station.id, e);
            let now_errored = {
                let mut session = self.session.lock();
                if session.generation == generation {
                    session.phase = SessionPhase::Error;
                    true
                } else {
                    false
                }
            };
            if now_errored {
                self.emit_state(PlaybackState::Error);
            }
        }
    }

    /// Replaces the engine queue with `track`: add, skip to it, then remove
    /// the old entries back-to-front. Media-control metadata stays valid
    /// throughout. On failure the queue is force-rebuilt from scratch.
    async fn swap_queue(&self, track: Track) -> EngineResult<()> {
        match self.try_swap(track.clone()).await {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!("[Session] Queue swap failed, forcing rebuild: {}", e);
                self.engine.stop().await?;
                self.engine.reset().await?;
                self.engine.add(track).await
            }
        }
    }

    async fn try_swap(&self, track: Track) -> EngineResult<()> {
        let old_len = self.engine.queue().await?.len();
        self.engine.add(track).await?;
        self.engine.skip(old_len).await?;
        for index in (0..old_len).rev() {
            self.engine.remove(index).await?;
        }
        Ok(())
    }

    async fn resolve_url(&self, station: &Station) -> String {
        match &self.http {
            Some(client) => resolve_stream_url(client, &station.stream_url).await,
            None => station.stream_url.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Persistence and event emission
    // ─────────────────────────────────────────────────────────────────────

    async fn persist_current_station(&self, station: &Station) {
        let raw = match serde_json::to_string(station) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("[Session] Failed to encode station: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::CURRENT_STATION, &raw).await {
            log::warn!("[Session] Failed to persist station: {}", e);
        }
    }

    async fn persist_playlist(&self, stations: &[Station]) {
        let raw = match serde_json::to_string(stations) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("[Session] Failed to encode playlist: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::PLAYLIST, &raw).await {
            log::warn!("[Session] Failed to persist playlist: {}", e);
        }
    }

    fn emit_state(&self, state: PlaybackState) {
        self.emitter.emit_session(SessionEvent::StateChanged {
            state,
            timestamp: now_millis(),
        });
    }

    fn emit_station(&self, station: Option<Station>) {
        self.emitter.emit_session(SessionEvent::StationChanged {
            station,
            timestamp: now_millis(),
        });
    }
}

fn push_state_change(events: &mut Vec<SessionEvent>, before: PlaybackState, after: PlaybackState) {
    if before != after {
        events.push(SessionEvent::StateChanged {
            state: after,
            timestamp: now_millis(),
        });
    }
}
