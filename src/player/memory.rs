use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::backend::{MediaPlayer, PlayerEvent};

/// Simulated media player with a manually advanced clock
///
/// Clones share the same state, so a test can keep a handle after boxing
/// the player into a controller. It can be made flaky: ignore the next N
/// seeks (position stays put, no `Seeked` event) or reject `play()`.
#[derive(Clone)]
pub struct InMemoryPlayer {
    inner: Arc<Mutex<PlayerState>>,
}

struct PlayerState {
    duration: f64,
    current_time: f64,
    paused: bool,
    ignored_seeks: usize,
    reject_play: bool,
    seek_log: Vec<f64>,
    event_buffer: usize,
    events: Option<mpsc::Sender<PlayerEvent>>,
    /// Metadata became available before anyone subscribed
    metadata_pending: bool,
}

impl PlayerState {
    fn emit(&self, event: PlayerEvent) {
        let Some(tx) = &self.events else {
            return;
        };
        if let Err(e) = tx.try_send(event) {
            warn!("Dropping player event {:?}: {}", event, e);
        }
    }
}

impl InMemoryPlayer {
    pub fn new(duration: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PlayerState {
                duration,
                current_time: 0.0,
                paused: true,
                ignored_seeks: 0,
                reject_play: false,
                seek_log: Vec::new(),
                event_buffer: 64,
                events: None,
                metadata_pending: false,
            })),
        }
    }

    pub fn with_event_buffer(self, capacity: usize) -> Self {
        self.state().event_buffer = capacity.max(1);
        self
    }

    fn state(&self) -> MutexGuard<'_, PlayerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the next `count` seek requests without moving the clock
    pub fn ignore_next_seeks(&self, count: usize) {
        self.state().ignored_seeks = count;
    }

    /// Make subsequent `play()` calls fail
    pub fn reject_play(&self, reject: bool) {
        self.state().reject_play = reject;
    }

    /// Every seek target requested so far, applied or not
    pub fn seek_log(&self) -> Vec<f64> {
        self.state().seek_log.clone()
    }

    /// Move the clock as if `delta` seconds of playback elapsed and emit a
    /// `TimeUpdate`. Does nothing while paused.
    pub fn advance(&self, delta: f64) -> f64 {
        let mut state = self.state();
        if !state.paused {
            state.current_time = (state.current_time + delta).min(state.duration);
            state.emit(PlayerEvent::TimeUpdate { time: state.current_time });
        }
        state.current_time
    }

    /// Emit `MetadataLoaded`. Before `start` the event is held and
    /// delivered as the first event of the stream.
    pub fn load_metadata(&self) {
        let mut state = self.state();
        if state.events.is_none() {
            debug!("Metadata loaded before the event stream started");
            state.metadata_pending = true;
            return;
        }
        state.emit(PlayerEvent::MetadataLoaded { duration: state.duration });
    }
}

#[async_trait::async_trait]
impl MediaPlayer for InMemoryPlayer {
    async fn start(&mut self) -> Result<mpsc::Receiver<PlayerEvent>> {
        let mut state = self.state();
        let (tx, rx) = mpsc::channel(state.event_buffer);
        state.events = Some(tx);
        if std::mem::take(&mut state.metadata_pending) {
            state.emit(PlayerEvent::MetadataLoaded { duration: state.duration });
        }

        info!("In-memory player started ({:.1}s media)", state.duration);
        Ok(rx)
    }

    fn current_time(&self) -> f64 {
        self.state().current_time
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        let mut state = self.state();
        state.seek_log.push(seconds);

        if state.ignored_seeks > 0 {
            state.ignored_seeks -= 1;
            debug!("Ignoring seek to {:.3}s", seconds);
            return Ok(());
        }

        state.current_time = seconds.clamp(0.0, state.duration);
        state.emit(PlayerEvent::Seeked { time: state.current_time });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state();
        if state.reject_play {
            anyhow::bail!("play() rejected by platform");
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.state().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
