//! Seek target selection for next/previous and highlight auto-advance.
//!
//! Everything here is pure: given the current original-video time and the
//! selection, pick where the player should go. `None` means stay put.

use crate::format::round_to_millisecond;
use crate::highlight::{build_clips, HighlightClip};
use crate::playback::PlaybackMode;
use crate::transcript::Sentence;

/// Window around a clip's original span used to decide the player is inside it
pub const CLIP_TOLERANCE_SECS: f64 = 0.1;

/// Window around a sentence's `[start, end)` span
pub const SENTENCE_TOLERANCE_SECS: f64 = 0.001;

/// Auto-advance jumps to the next clip once playback is this close to a clip's end
pub const CLIP_END_LEAD_SECS: f64 = 0.2;

fn within_clip(time: f64, clip: &HighlightClip) -> bool {
    time >= clip.original_start_time - CLIP_TOLERANCE_SECS
        && time <= clip.original_end_time + CLIP_TOLERANCE_SECS
}

fn within_sentence(time: f64, sentence: &Sentence) -> bool {
    time >= sentence.start_time - SENTENCE_TOLERANCE_SECS
        && time < sentence.end_time + SENTENCE_TOLERANCE_SECS
}

/// Index of the sentence containing `time`. When the tolerance makes two
/// abutting sentences match, the later one wins so a position sitting on a
/// sentence start belongs to that sentence.
fn sentence_index(time: f64, sentences: &[Sentence]) -> Option<usize> {
    sentences.iter().rposition(|s| within_sentence(time, s))
}

fn last_sentence_start(clip: &HighlightClip) -> Option<f64> {
    clip.last_sentence().map(|s| s.start_time)
}

/// Next seek target in the given mode
pub fn next_target(mode: PlaybackMode, current: f64, selected: &[Sentence]) -> Option<f64> {
    match mode {
        PlaybackMode::Highlights => next_clip_target(current, &build_clips(selected)),
        PlaybackMode::Full => next_sentence_target(current, selected),
    }
}

/// Previous seek target in the given mode
pub fn previous_target(mode: PlaybackMode, current: f64, selected: &[Sentence]) -> Option<f64> {
    match mode {
        PlaybackMode::Highlights => previous_clip_target(current, &build_clips(selected)),
        PlaybackMode::Full => previous_sentence_target(current, selected),
    }
}

/// Highlight mode: next sentence in the clip, else the next clip's start,
/// else wrap to the first clip.
pub fn next_clip_target(current: f64, clips: &[HighlightClip]) -> Option<f64> {
    let current = round_to_millisecond(current);

    if let Some(clip_idx) = clips.iter().position(|c| within_clip(current, c)) {
        let clip = &clips[clip_idx];

        if let Some(idx) = sentence_index(current, &clip.sentences) {
            if let Some(next) = clip.sentences.get(idx + 1) {
                return Some(next.start_time);
            }
        }

        if let Some(next_clip) = clips.get(clip_idx + 1) {
            return Some(next_clip.original_start_time);
        }

        return clips.first().map(|c| c.original_start_time);
    }

    // Outside every clip: closest clip starting after the current time
    clips
        .iter()
        .filter(|c| c.original_start_time > current)
        .min_by(|a, b| a.original_start_time.total_cmp(&b.original_start_time))
        .or_else(|| clips.first())
        .map(|c| c.original_start_time)
}

/// Highlight mode: previous sentence in the clip, else the last sentence of
/// the previous clip, else wrap to the last sentence of the last clip.
pub fn previous_clip_target(current: f64, clips: &[HighlightClip]) -> Option<f64> {
    let current = round_to_millisecond(current);

    if let Some(clip_idx) = clips.iter().position(|c| within_clip(current, c)) {
        let clip = &clips[clip_idx];

        if let Some(idx) = sentence_index(current, &clip.sentences) {
            if idx > 0 {
                return Some(clip.sentences[idx - 1].start_time);
            }
        }

        if clip_idx > 0 {
            return last_sentence_start(&clips[clip_idx - 1]);
        }

        return clips.last().and_then(last_sentence_start);
    }

    // Outside every clip: closest clip starting before the current time
    clips
        .iter()
        .filter(|c| c.original_start_time < current)
        .max_by(|a, b| a.original_start_time.total_cmp(&b.original_start_time))
        .or_else(|| clips.last())
        .and_then(last_sentence_start)
}

/// Full-video mode: the following selected sentence, else the closest
/// sentence starting later. No wraparound.
pub fn next_sentence_target(current: f64, sentences: &[Sentence]) -> Option<f64> {
    let current = round_to_millisecond(current);

    if let Some(idx) = sentence_index(current, sentences) {
        if let Some(next) = sentences.get(idx + 1) {
            return Some(next.start_time);
        }
    }

    sentences
        .iter()
        .map(|s| s.start_time)
        .filter(|start| *start > current)
        .min_by(f64::total_cmp)
}

/// Full-video mode: the preceding selected sentence, else the closest
/// sentence starting earlier. No wraparound.
pub fn previous_sentence_target(current: f64, sentences: &[Sentence]) -> Option<f64> {
    let current = round_to_millisecond(current);

    if let Some(idx) = sentence_index(current, sentences) {
        if idx > 0 {
            return Some(sentences[idx - 1].start_time);
        }
    }

    sentences
        .iter()
        .map(|s| s.start_time)
        .filter(|start| *start < current)
        .max_by(f64::total_cmp)
}

/// Decide whether highlight playback at `current` must jump to keep
/// un-selected footage off screen.
///
/// Returns the next clip's start when the player drifted outside every clip
/// or entered the final [`CLIP_END_LEAD_SECS`] of its clip, looping to the
/// first clip when no later clip exists.
pub fn auto_advance_target(current: f64, clips: &[HighlightClip]) -> Option<f64> {
    let mut current_clip_end = None;
    let mut next_start = None;

    for (i, clip) in clips.iter().enumerate() {
        if within_clip(current, clip) {
            current_clip_end = Some(clip.original_end_time);
            if current >= clip.original_end_time - CLIP_END_LEAD_SECS {
                next_start = clips.get(i + 1).map(|c| c.original_start_time);
            }
            break;
        }

        if current < clip.original_start_time - CLIP_TOLERANCE_SECS {
            next_start = Some(clip.original_start_time);
            break;
        }
    }

    let must_jump = match current_clip_end {
        Some(end) => current >= end - CLIP_END_LEAD_SECS,
        None => true,
    };

    if !must_jump {
        return None;
    }

    next_start.or_else(|| clips.first().map(|c| c.original_start_time))
}
