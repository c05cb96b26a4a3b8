use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transcript::Sentence;

/// Sentences separated by at most this many seconds share a clip (inclusive)
pub const MERGE_GAP_SECS: f64 = 5.0;

/// A maximal run of selected sentences, in both coordinate systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightClip {
    /// `clip-<n>`, 1-based in timeline order
    pub id: String,

    /// Start on the highlight timeline
    pub start_time: f64,

    /// End on the highlight timeline
    pub end_time: f64,

    /// Merged sentences, sorted by start time
    pub sentences: Vec<Sentence>,

    pub original_start_time: f64,
    pub original_end_time: f64,
}

impl HighlightClip {
    fn from_group(index: usize, start_time: f64, group: Vec<Sentence>) -> Option<Self> {
        let original_start_time = group.first()?.start_time;
        let original_end_time = group.last()?.end_time;

        Some(Self {
            id: format!("clip-{}", index + 1),
            start_time,
            end_time: start_time + (original_end_time - original_start_time),
            sentences: group,
            original_start_time,
            original_end_time,
        })
    }

    /// Length on the highlight timeline (equal to the original span)
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn first_sentence(&self) -> Option<&Sentence> {
        self.sentences.first()
    }

    pub fn last_sentence(&self) -> Option<&Sentence> {
        self.sentences.last()
    }
}

/// Merge selected sentences into highlight clips.
///
/// Input order does not matter: sentences are stable-sorted by start time
/// first. A sentence joins the current clip when its gap to the previous
/// sentence is at most [`MERGE_GAP_SECS`]. Gaps inside a clip are kept, so a
/// clip's duration is the span from its first start to its last end.
pub fn build_clips(selected: &[Sentence]) -> Vec<HighlightClip> {
    let mut sorted = selected.to_vec();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut clips: Vec<HighlightClip> = Vec::new();
    let mut group: Vec<Sentence> = Vec::new();
    let mut timeline_cursor = 0.0;

    for sentence in sorted {
        let extends = group
            .last()
            .map_or(true, |prev| sentence.start_time - prev.end_time <= MERGE_GAP_SECS);

        if !extends {
            let closed = std::mem::take(&mut group);
            if let Some(clip) = HighlightClip::from_group(clips.len(), timeline_cursor, closed) {
                timeline_cursor = clip.end_time;
                clips.push(clip);
            }
        }

        group.push(sentence);
    }

    if let Some(clip) = HighlightClip::from_group(clips.len(), timeline_cursor, group) {
        clips.push(clip);
    }

    debug!(
        "Built {} highlight clips ({:.3}s) from {} sentences",
        clips.len(),
        total_duration(&clips),
        selected.len()
    );

    clips
}

/// Total length of the highlight timeline
pub fn total_duration(clips: &[HighlightClip]) -> f64 {
    clips.iter().map(HighlightClip::duration).sum()
}
