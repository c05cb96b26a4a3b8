use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub seek_verify_delay_ms: u64,
    pub start_in_highlights: bool,
    pub event_buffer: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_verify_delay_ms: 100,
            start_in_highlights: true,
            event_buffer: 64,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscriptConfig {
    pub path: PathBuf,
    #[serde(default = "default_apply_suggestions")]
    pub apply_suggestions: bool,
}

fn default_apply_suggestions() -> bool {
    true
}

impl Config {
    /// Load from a config file (extension optional) with
    /// `HIGHLIGHT_REEL__SECTION__KEY` environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("HIGHLIGHT_REEL").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seek_verify_delay: Duration::from_millis(self.playback.seek_verify_delay_ms),
            start_in_highlights: self.playback.start_in_highlights,
            event_buffer: self.playback.event_buffer.max(1),
            ..SessionConfig::default()
        }
    }
}
