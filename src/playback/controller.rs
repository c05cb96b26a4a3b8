use tracing::{debug, info, warn};

use super::markers::{clip_markers, sentence_markers, TimelineMarker};
use super::mode::{ModeTransition, PlaybackMode};
use super::state::HighlightPlaybackState;
use crate::error::EditorError;
use crate::highlight::{build_clips, to_highlight_time, to_original_time, total_duration, HighlightClip};
use crate::navigation::{
    auto_advance_target, next_target, previous_target, SeekStats, SeekToken, Seeker, VerifyOutcome,
};
use crate::player::{MediaPlayer, PlayerEvent};
use crate::transcript::VideoData;

#[derive(Debug, Clone, Copy)]
struct DragState {
    was_playing: bool,
}

/// Drives one video's playback in full or highlight mode
///
/// Clips are never stored: every operation rebuilds them from the current
/// selection. Positions are tracked in original-video seconds; the display
/// position is derived from the mode.
pub struct PlaybackController {
    video: VideoData,
    player: Box<dyn MediaPlayer>,
    mode: PlaybackMode,

    /// Last known player position (original-video seconds)
    original_time: f64,

    is_playing: bool,
    drag: Option<DragState>,
    seeker: Seeker,
    state: HighlightPlaybackState,
    auto_advances: u64,
}

impl PlaybackController {
    /// Create a controller. With `start_in_highlights` the controller opens
    /// in highlight mode when anything is selected.
    pub fn new(video: VideoData, player: Box<dyn MediaPlayer>, start_in_highlights: bool) -> Self {
        let mode = if start_in_highlights && video.has_selection() {
            PlaybackMode::Highlights
        } else {
            PlaybackMode::Full
        };
        let original_time = player.current_time();

        info!(
            "Playback controller ready: mode={}, player={}, {} selected sentences",
            mode,
            player.name(),
            video.selected_sentences().len()
        );

        let mut controller = Self {
            video,
            player,
            mode,
            original_time,
            is_playing: false,
            drag: None,
            seeker: Seeker::new(),
            state: HighlightPlaybackState::default(),
            auto_advances: 0,
        };
        controller.refresh_state();
        controller
    }

    pub fn video(&self) -> &VideoData {
        &self.video
    }

    pub fn player(&self) -> &dyn MediaPlayer {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> &mut dyn MediaPlayer {
        self.player.as_mut()
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Last known player position in original-video seconds
    pub fn original_time(&self) -> f64 {
        self.original_time
    }

    pub fn highlight_state(&self) -> &HighlightPlaybackState {
        &self.state
    }

    pub fn seek_stats(&self) -> SeekStats {
        self.seeker.stats()
    }

    pub fn auto_advances(&self) -> u64 {
        self.auto_advances
    }

    /// Clips for the current selection
    pub fn clips(&self) -> Vec<HighlightClip> {
        build_clips(&self.video.selected_sentences())
    }

    /// Position shown to the user, in the current mode's coordinates
    pub fn current_display_time(&self) -> f64 {
        match self.mode {
            PlaybackMode::Full => self.original_time,
            PlaybackMode::Highlights => to_highlight_time(self.original_time, &self.clips()),
        }
    }

    /// Length of the timeline in the current mode
    pub fn total_duration(&self) -> f64 {
        match self.mode {
            PlaybackMode::Full => self.video.duration,
            PlaybackMode::Highlights => total_duration(&self.clips()),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        crate::format::time_to_percentage(self.current_display_time(), self.total_duration())
    }

    /// Display time for a `0..=1` fraction of the timeline bar
    pub fn position_to_time(&self, fraction: f64) -> f64 {
        fraction.clamp(0.0, 1.0) * self.total_duration()
    }

    /// Text of the sentence under the player position
    pub fn current_caption(&self) -> Option<&str> {
        self.video
            .sentence_at(self.original_time)
            .map(|s| s.text.as_str())
    }

    pub fn timeline_markers(&self) -> Vec<TimelineMarker> {
        match self.mode {
            PlaybackMode::Full => sentence_markers(&self.video),
            PlaybackMode::Highlights => {
                let clips = self.clips();
                clip_markers(&clips, total_duration(&clips))
            }
        }
    }

    /// Flip a sentence's selection. Dropping the last selected sentence
    /// while in highlight mode falls back to full-video mode.
    pub fn toggle_sentence(&mut self, id: &str) -> Result<bool, EditorError> {
        let selected = self.video.toggle_sentence(id)?;

        if self.mode.is_highlights() && !self.video.has_selection() {
            info!("Selection is empty, leaving highlight mode");
            self.mode = PlaybackMode::Full;
        }

        self.refresh_state();
        Ok(selected)
    }

    /// Switch between full-video and highlight mode, keeping the perceived
    /// position. A no-op while nothing is selected. Returns the active mode.
    pub fn toggle_mode(&mut self) -> PlaybackMode {
        if !self.video.has_selection() {
            debug!("Mode toggle ignored: nothing selected");
            return self.mode;
        }

        let clips = self.clips();
        let transition = ModeTransition::toggle(self.mode, self.original_time, &clips);

        info!(
            "Switching to {}: display {:.3}s, player {:.3}s",
            transition.mode, transition.display_time, transition.original_time
        );

        self.mode = transition.mode;
        self.issue_seek(transition.original_time, false);
        self.mode
    }

    /// Seek to a display-time position (timeline click or scrub)
    pub fn seek_to_display(&mut self, display_time: f64) {
        let target = match self.mode {
            PlaybackMode::Full => display_time,
            PlaybackMode::Highlights => to_original_time(display_time, &self.clips()),
        };
        self.issue_seek(target, false);
    }

    /// Seek to the start of a sentence (transcript click)
    pub fn seek_to_sentence(&mut self, id: &str) -> Result<(), EditorError> {
        let start = self
            .video
            .sentence(id)
            .map(|s| s.start_time)
            .ok_or_else(|| EditorError::UnknownSentence(id.to_string()))?;

        self.issue_seek(start, false);
        Ok(())
    }

    /// Move to the next sentence or clip. Returns the seek target, if any.
    pub fn next(&mut self) -> Option<f64> {
        let current = self.player.current_time();
        let target = next_target(self.mode, current, &self.video.selected_sentences())?;
        debug!("Next from {:.3}s -> {:.3}s ({})", current, target, self.mode);
        Some(self.issue_seek(target, false))
    }

    /// Move to the previous sentence or clip. Returns the seek target, if any.
    pub fn previous(&mut self) -> Option<f64> {
        let current = self.player.current_time();
        let target = previous_target(self.mode, current, &self.video.selected_sentences())?;
        debug!("Previous from {:.3}s -> {:.3}s ({})", current, target, self.mode);
        Some(self.issue_seek(target, false))
    }

    pub fn play(&mut self) {
        match self.player.play() {
            Ok(()) => self.is_playing = true,
            Err(e) => {
                warn!("Play failed: {}", e);
                self.is_playing = false;
            }
        }
    }

    pub fn pause(&mut self) {
        self.player.pause();
        self.is_playing = false;
    }

    /// Pause for the duration of a scrub; auto-advance is suspended until
    /// [`drag_end`](Self::drag_end)
    pub fn drag_start(&mut self) {
        let was_playing = self.is_playing;
        if was_playing {
            self.pause();
        }
        self.drag = Some(DragState { was_playing });
    }

    /// Scrub position update while dragging
    pub fn drag_to(&mut self, display_time: f64) {
        self.seek_to_display(display_time);
    }

    /// Finish a scrub with an explicit seek. Playback stays paused.
    pub fn drag_end(&mut self, display_time: f64) {
        if let Some(drag) = self.drag.take() {
            debug!("Drag ended at {:.3}s (was playing: {})", display_time, drag.was_playing);
        }
        self.seek_to_display(display_time);
    }

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TimeUpdate { time } => {
                self.apply_time_update(time);
                self.maybe_auto_advance(time);
            }
            PlayerEvent::Seeked { time } => {
                let Some(completed) = self.seeker.complete(time) else {
                    return;
                };
                self.apply_time_update(time);
                if completed.resume_playback {
                    self.resume_after_seek();
                }
            }
            PlayerEvent::MetadataLoaded { duration } => {
                debug!("Metadata loaded: {:.1}s", duration);
                let start = match self.mode {
                    PlaybackMode::Highlights => {
                        self.clips().first().map_or(0.0, |c| c.original_start_time)
                    }
                    PlaybackMode::Full => 0.0,
                };
                self.issue_seek(start, false);
            }
        }
    }

    /// Token of a freshly issued seek that needs its verification check
    pub fn take_pending_verification(&mut self) -> Option<SeekToken> {
        self.seeker.take_verification_due()
    }

    /// Verification re-check for a seek, issued after the verify delay
    pub fn verify_seek(&mut self, token: SeekToken) {
        let resume_playback = self
            .seeker
            .pending()
            .is_some_and(|p| p.token == token && p.resume_playback);

        match self.seeker.verify(self.player.as_mut(), token) {
            VerifyOutcome::Converged { .. } => {
                if resume_playback {
                    self.resume_after_seek();
                }
            }
            VerifyOutcome::Corrected { reported } => {
                self.apply_time_update(reported);
                if resume_playback {
                    self.resume_after_seek();
                }
            }
            VerifyOutcome::Unconverged { requested, reported } => {
                // Display keeps the requested time
                debug!("Keeping {:.3}s on display, player at {:.3}s", requested, reported);
            }
            VerifyOutcome::Settled => {}
        }
    }

    fn resume_after_seek(&mut self) {
        if !self.is_playing {
            return;
        }
        if let Err(e) = self.player.play() {
            debug!("Resume after seek rejected: {}", e);
        }
    }

    fn issue_seek(&mut self, target: f64, resume_playback: bool) -> f64 {
        let target = self.seeker.seek(self.player.as_mut(), target, resume_playback);
        self.apply_time_update(target);
        target
    }

    fn apply_time_update(&mut self, original_time: f64) {
        self.original_time = original_time;
        self.refresh_state();
    }

    fn maybe_auto_advance(&mut self, time: f64) {
        if !self.mode.is_highlights() || !self.is_playing || self.drag.is_some() {
            return;
        }

        let Some(target) = auto_advance_target(time, &self.clips()) else {
            return;
        };

        if self.seeker.is_pending_to(target) {
            return;
        }

        debug!("Auto-advance from {:.3}s to {:.3}s", time, target);
        self.auto_advances += 1;
        self.issue_seek(target, true);
    }

    fn refresh_state(&mut self) {
        self.state = HighlightPlaybackState::compute(
            self.mode.is_highlights(),
            self.original_time,
            &self.clips(),
        );
    }
}
