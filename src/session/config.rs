use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an editor session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "editor-6f1c...")
    pub session_id: String,

    /// Delay before re-checking that a seek took effect
    /// Default: 100ms
    pub seek_verify_delay: Duration,

    /// Open in highlight mode when the transcript already has a selection
    pub start_in_highlights: bool,

    /// Capacity of the intent channel and of the player event stream
    /// (at least 1)
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("editor-{}", uuid::Uuid::new_v4()),
            seek_verify_delay: Duration::from_millis(100),
            start_in_highlights: true,
            event_buffer: 64,
        }
    }
}
