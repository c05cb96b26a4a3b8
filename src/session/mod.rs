//! Editor session management
//!
//! This module provides the `EditorSession` event loop that multiplexes:
//! - Player events (position ticks, metadata, seek completions)
//! - User intents forwarded by the UI surface
//! - Seek verification re-checks
//!
//! and reports session statistics when the intent stream closes.

mod config;
mod intent;
mod session;
mod stats;

pub use config::SessionConfig;
pub use intent::EditorIntent;
pub use session::EditorSession;
pub use stats::SessionStats;
