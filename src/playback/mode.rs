use serde::{Deserialize, Serialize};
use std::fmt;

use crate::highlight::{to_highlight_time, to_original_time, HighlightClip};

/// Which coordinate system drives playback and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Native timeline of the whole video
    #[default]
    Full,
    /// Compressed timeline made of the selected clips only
    Highlights,
}

impl PlaybackMode {
    pub fn is_highlights(self) -> bool {
        self == PlaybackMode::Highlights
    }

    pub fn toggled(self) -> Self {
        match self {
            PlaybackMode::Full => PlaybackMode::Highlights,
            PlaybackMode::Highlights => PlaybackMode::Full,
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackMode::Full => write!(f, "Full Video"),
            PlaybackMode::Highlights => write!(f, "Highlights"),
        }
    }
}

/// Result of switching modes: where the player goes and what is displayed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTransition {
    pub mode: PlaybackMode,
    /// Player position after the switch
    pub original_time: f64,
    /// Display position after the switch, in the new mode's coordinates
    pub display_time: f64,
}

impl ModeTransition {
    /// Compute the switch away from `from` with the player at `original_time`.
    ///
    /// Full to highlights keeps the player where it is and converts the
    /// position to highlight time. Highlights to full converts the displayed
    /// highlight time back to original time and moves the player there.
    pub fn toggle(from: PlaybackMode, original_time: f64, clips: &[HighlightClip]) -> Self {
        match from {
            PlaybackMode::Full => Self {
                mode: PlaybackMode::Highlights,
                original_time,
                display_time: to_highlight_time(original_time, clips),
            },
            PlaybackMode::Highlights => {
                let highlight_time = to_highlight_time(original_time, clips);
                let target = to_original_time(highlight_time, clips);
                Self {
                    mode: PlaybackMode::Full,
                    original_time: target,
                    display_time: target,
                }
            }
        }
    }
}
