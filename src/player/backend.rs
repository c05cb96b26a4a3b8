use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted by the backing player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback position changed (periodic tick while playing)
    TimeUpdate { time: f64 },
    /// Media metadata is available; position can now be set
    MetadataLoaded { duration: f64 },
    /// A position change requested through `set_current_time` took effect
    Seeked { time: f64 },
}

/// Media playback capability
///
/// Implementations:
/// - Browser/native bridges forward a real media element
/// - `InMemoryPlayer`: simulated clock for tests and offline runs
#[async_trait::async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Start delivering player events
    ///
    /// Returns a channel receiver that will receive position, metadata and
    /// seek-completion events
    async fn start(&mut self) -> Result<mpsc::Receiver<PlayerEvent>>;

    /// Current position in original-video seconds
    fn current_time(&self) -> f64;

    /// Request a seek. Completion is reported asynchronously through
    /// `PlayerEvent::Seeked`; the request may silently fail to apply.
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Start playback. The platform may reject this.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Player name for logging
    fn name(&self) -> &str;
}
