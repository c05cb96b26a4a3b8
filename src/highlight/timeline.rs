use serde::Serialize;

use super::clips::HighlightClip;

/// Where an original-video time lands inside the clip list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipPosition {
    pub clip_index: usize,
    /// Seconds since the clip's original start
    pub offset: f64,
}

/// Convert a highlight-timeline time to original-video time.
///
/// Times past the end of the highlight timeline clamp to the last clip's
/// original end; negative times clamp to the first clip's start. With no
/// clips the input is returned unchanged.
pub fn to_original_time(highlight_time: f64, clips: &[HighlightClip]) -> f64 {
    let Some(last) = clips.last() else {
        return highlight_time;
    };

    let highlight_time = highlight_time.max(0.0);
    let mut accumulated = 0.0;

    for clip in clips {
        let duration = clip.duration();
        if highlight_time <= accumulated + duration {
            return clip.original_start_time + (highlight_time - accumulated);
        }
        accumulated += duration;
    }

    last.original_end_time
}

/// Convert an original-video time to highlight-timeline time.
///
/// Inside a clip's original span `[start, end]` this is the exact inverse of
/// [`to_original_time`]. In a gap between clips the result snaps to the
/// highlight position of the nearest clip boundary (start or end, whichever
/// is closer; the earliest boundary wins ties). With no clips the input is
/// returned unchanged.
pub fn to_highlight_time(original_time: f64, clips: &[HighlightClip]) -> f64 {
    let Some(first) = clips.first() else {
        return original_time;
    };

    let mut accumulated = 0.0;
    for clip in clips {
        if original_time >= clip.original_start_time && original_time <= clip.original_end_time {
            return accumulated + (original_time - clip.original_start_time);
        }
        accumulated += clip.duration();
    }

    let mut min_distance = (original_time - first.original_start_time).abs();
    let mut snapped = first.start_time;

    for clip in clips {
        let to_start = (original_time - clip.original_start_time).abs();
        if to_start < min_distance {
            min_distance = to_start;
            snapped = clip.start_time;
        }

        let to_end = (original_time - clip.original_end_time).abs();
        if to_end < min_distance {
            min_distance = to_end;
            snapped = clip.end_time;
        }
    }

    snapped
}

/// Clip containing `original_time` (inclusive bounds) and the offset into it
pub fn clip_position(original_time: f64, clips: &[HighlightClip]) -> Option<ClipPosition> {
    clips
        .iter()
        .position(|clip| {
            original_time >= clip.original_start_time && original_time <= clip.original_end_time
        })
        .map(|clip_index| ClipPosition {
            clip_index,
            offset: original_time - clips[clip_index].original_start_time,
        })
}
