pub mod config;
pub mod error;
pub mod format;
pub mod highlight;
pub mod navigation;
pub mod playback;
pub mod player;
pub mod session;
pub mod transcript;

pub use config::Config;
pub use error::EditorError;
pub use highlight::{
    build_clips, to_highlight_time, to_original_time, total_duration, HighlightClip,
};
pub use navigation::{next_target, previous_target, Seeker};
pub use playback::{HighlightPlaybackState, ModeTransition, PlaybackController, PlaybackMode};
pub use player::{InMemoryPlayer, MediaPlayer, PlayerEvent};
pub use session::{EditorIntent, EditorSession, SessionConfig, SessionStats};
pub use transcript::{Section, Sentence, VideoData};
