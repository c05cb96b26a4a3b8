use serde::{Deserialize, Serialize};

use crate::highlight::{clip_position, total_duration, HighlightClip};

/// Transient highlight-playback view, recomputed whenever the selection or
/// position changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightPlaybackState {
    pub is_playing_highlights: bool,

    /// Length of the highlight timeline in seconds
    pub total_highlight_time: f64,

    /// Clip containing the player position (0 when outside every clip)
    pub current_clip_index: usize,

    /// Seconds into the current clip
    pub current_clip_time: f64,
}

impl HighlightPlaybackState {
    pub fn compute(is_playing_highlights: bool, original_time: f64, clips: &[HighlightClip]) -> Self {
        let position = clip_position(original_time, clips);

        Self {
            is_playing_highlights,
            total_highlight_time: total_duration(clips),
            current_clip_index: position.map_or(0, |p| p.clip_index),
            current_clip_time: position.map_or(0.0, |p| p.offset),
        }
    }
}
