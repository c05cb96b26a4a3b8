//! Highlight clips and the highlight-timeline mapping
//!
//! Clips are derived data: a pure function of the current selection. Every
//! consumer rebuilds them with [`build_clips`] so all views agree on the
//! merge and sort rule.

mod clips;
mod timeline;

pub use clips::{build_clips, total_duration, HighlightClip, MERGE_GAP_SECS};
pub use timeline::{clip_position, to_highlight_time, to_original_time, ClipPosition};
