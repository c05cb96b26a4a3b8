use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackMode;

/// Statistics about an editor session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Mode at the time of the snapshot
    pub mode: PlaybackMode,

    pub selected_sentences: usize,
    pub clip_count: usize,

    /// Length of the highlight timeline in seconds
    pub highlight_duration_secs: f64,

    pub seeks_issued: u64,

    /// Seeks that had to be re-issued after the verification check
    pub seek_retries: u64,

    /// Seeks still off target after the retry
    pub unconverged_seeks: u64,

    /// Seek completions ignored because a newer seek superseded them
    pub stale_completions: u64,

    /// Jumps made to skip un-selected footage in highlight mode
    pub auto_advances: u64,
}
