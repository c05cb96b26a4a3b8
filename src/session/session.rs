use super::config::SessionConfig;
use super::intent::EditorIntent;
use super::stats::SessionStats;
use crate::highlight::total_duration;
use crate::navigation::SeekToken;
use crate::playback::PlaybackController;
use crate::player::MediaPlayer;
use crate::transcript::VideoData;
use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};

/// An editing session for one video: the controller plus its event loop
///
/// All state is owned by the task running [`EditorSession::run`]; events are
/// handled one at a time in arrival order.
pub struct EditorSession {
    /// Session configuration
    config: SessionConfig,

    /// Playback state and the player it drives
    controller: PlaybackController,

    /// When the session started
    started_at: chrono::DateTime<chrono::Utc>,
}

impl EditorSession {
    /// Create a new editor session
    pub fn new(config: SessionConfig, video: VideoData, player: Box<dyn MediaPlayer>) -> Self {
        info!("Creating editor session: {}", config.session_id);

        let controller = PlaybackController::new(video, player, config.start_in_highlights);

        Self {
            config,
            controller,
            started_at: Utc::now(),
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    /// Apply one user intent. Invalid sentence ids are logged and dropped.
    pub fn handle_intent(&mut self, intent: EditorIntent) {
        let controller = &mut self.controller;

        match intent {
            EditorIntent::ToggleSentence { id } => {
                if let Err(e) = controller.toggle_sentence(&id) {
                    warn!("Toggle ignored: {}", e);
                }
            }
            EditorIntent::SeekTo { time } => controller.seek_to_display(time),
            EditorIntent::SeekToSentence { id } => {
                if let Err(e) = controller.seek_to_sentence(&id) {
                    warn!("Seek ignored: {}", e);
                }
            }
            EditorIntent::DragStart => controller.drag_start(),
            EditorIntent::DragMove { time } => controller.drag_to(time),
            EditorIntent::DragEnd { time } => controller.drag_end(time),
            EditorIntent::ToggleMode => {
                controller.toggle_mode();
            }
            EditorIntent::Play => controller.play(),
            EditorIntent::Pause => controller.pause(),
            EditorIntent::Next => {
                controller.next();
            }
            EditorIntent::Previous => {
                controller.previous();
            }
        }
    }

    /// Run the event loop until the intent channel closes
    ///
    /// Starts the player's event stream, then handles player events, user
    /// intents and seek verification checks one at a time. Returns the final
    /// session statistics.
    pub async fn run(mut self, mut intents: mpsc::Receiver<EditorIntent>) -> Result<SessionStats> {
        info!("Starting editor session: {}", self.config.session_id);

        let mut player_events = self
            .controller
            .player_mut()
            .start()
            .await
            .context("Failed to start player events")?;

        let mut player_open = true;
        let mut verification: Option<(SeekToken, Instant)> = None;

        loop {
            // A newer seek replaces any scheduled check for an older one
            if let Some(token) = self.controller.take_pending_verification() {
                verification = Some((token, Instant::now() + self.config.seek_verify_delay));
            }

            let deadline = verification.map(|(_, at)| at);
            let verify_timer = async move {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent),
                    None => break,
                },
                event = player_events.recv(), if player_open => match event {
                    Some(event) => self.controller.handle_player_event(event),
                    None => {
                        warn!("Player event stream closed");
                        player_open = false;
                    }
                },
                _ = verify_timer => {
                    if let Some((token, _)) = verification.take() {
                        self.controller.verify_seek(token);
                    }
                }
            }
        }

        let stats = self.stats();
        info!(
            "Editor session stopped: {} seeks ({} retried), {} auto-advances",
            stats.seeks_issued, stats.seek_retries, stats.auto_advances
        );

        Ok(stats)
    }

    /// Get current session statistics
    pub fn stats(&self) -> SessionStats {
        let clips = self.controller.clips();
        let seeks = self.controller.seek_stats();

        SessionStats {
            session_id: self.config.session_id.clone(),
            started_at: self.started_at,
            mode: self.controller.mode(),
            selected_sentences: self.controller.video().selected_sentences().len(),
            clip_count: clips.len(),
            highlight_duration_secs: total_duration(&clips),
            seeks_issued: seeks.seeks_issued,
            seek_retries: seeks.seek_retries,
            unconverged_seeks: seeks.unconverged_seeks,
            stale_completions: seeks.stale_completions,
            auto_advances: self.controller.auto_advances(),
        }
    }
}
