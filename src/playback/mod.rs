//! Playback mode control
//!
//! [`PlaybackController`] owns the transcript, the player handle and the
//! current mode. It reacts to discrete events (user intents, player ticks,
//! seek completions) and keeps full-video and highlight positions in step.

mod controller;
mod markers;
mod mode;
mod state;

pub use controller::PlaybackController;
pub use markers::{clip_markers, sentence_markers, TimelineMarker};
pub use mode::{ModeTransition, PlaybackMode};
pub use state::HighlightPlaybackState;
