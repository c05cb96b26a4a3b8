use serde::Serialize;

use crate::format::time_to_percentage;
use crate::highlight::HighlightClip;
use crate::transcript::VideoData;

/// A highlighted span on the timeline bar, in percent of the bar width
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMarker {
    /// Clip or sentence id
    pub id: String,
    pub left_percent: f64,
    pub width_percent: f64,
    /// Suggested by ingestion but not selected
    pub suggested: bool,
}

/// One marker per clip across the highlight timeline
pub fn clip_markers(clips: &[HighlightClip], total: f64) -> Vec<TimelineMarker> {
    if total <= 0.0 {
        return Vec::new();
    }

    clips
        .iter()
        .map(|clip| TimelineMarker {
            id: clip.id.clone(),
            left_percent: time_to_percentage(clip.start_time, total),
            width_percent: time_to_percentage(clip.duration(), total),
            suggested: false,
        })
        .collect()
}

/// One marker per selected or suggested sentence across the full video
pub fn sentence_markers(video: &VideoData) -> Vec<TimelineMarker> {
    if video.duration <= 0.0 {
        return Vec::new();
    }

    video
        .sentences()
        .filter(|s| s.selected || s.suggested)
        .map(|s| TimelineMarker {
            id: s.id.clone(),
            left_percent: time_to_percentage(s.start_time, video.duration),
            width_percent: time_to_percentage(s.duration(), video.duration),
            suggested: s.suggested && !s.selected,
        })
        .collect()
}
