use serde::{Deserialize, Serialize};

/// Discrete user actions forwarded by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorIntent {
    ToggleSentence { id: String },
    /// Timeline click, in display coordinates
    SeekTo { time: f64 },
    /// Transcript click
    SeekToSentence { id: String },
    DragStart,
    DragMove { time: f64 },
    DragEnd { time: f64 },
    ToggleMode,
    Play,
    Pause,
    Next,
    Previous,
}
