//! Media playback collaborator
//!
//! The engine never owns a real media element. It drives playback through
//! the narrow [`MediaPlayer`] capability (read/set position, play/pause,
//! event stream) so mapping and navigation can run against
//! [`InMemoryPlayer`] in tests and in the demo binary.

pub mod backend;
pub mod memory;

pub use backend::{MediaPlayer, PlayerEvent};
pub use memory::InMemoryPlayer;
