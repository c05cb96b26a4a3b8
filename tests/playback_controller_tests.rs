// Integration tests for the playback mode controller
//
// These drive PlaybackController synchronously against an InMemoryPlayer.
// The player's event stream is never started, so player events are fed in
// by hand through handle_player_event.
//
// Fixture (original-video seconds, 30s video):
//   s1 [1, 3]   selected
//   s2 [5, 8]   selected
//   x  [10, 12] not selected
//   s3 [20, 22] selected
//   y  [25, 27] suggested only
//
// Clips: clip-1 [1, 8] -> highlight [0, 7], clip-2 [20, 22] -> highlight [7, 9]

use anyhow::Result;
use highlight_reel::{
    EditorError, InMemoryPlayer, MediaPlayer, PlaybackController, PlaybackMode, PlayerEvent,
    Section, Sentence, VideoData,
};

const EPSILON: f64 = 1e-6;

fn fixture() -> VideoData {
    VideoData {
        url: "https://example.invalid/demo.mp4".to_string(),
        duration: 30.0,
        transcript: vec![
            Section {
                id: "intro".to_string(),
                title: "Intro".to_string(),
                sentences: vec![
                    Sentence::new("s1", 1.0, 3.0, "Welcome to the demo.").selected(),
                    Sentence::new("x", 10.0, 12.0, "An aside nobody needs."),
                ],
            },
            Section {
                id: "body".to_string(),
                title: "Body".to_string(),
                sentences: vec![
                    Sentence::new("s3", 20.0, 22.0, "And that is the punchline.").selected(),
                    Sentence::new("s2", 5.0, 8.0, "Here is the main idea.").selected(),
                    Sentence {
                        suggested: true,
                        ..Sentence::new("y", 25.0, 27.0, "Maybe worth keeping.")
                    },
                ],
            },
        ],
        suggested_highlights: vec!["y".to_string()],
    }
}

fn unselected_fixture() -> VideoData {
    let mut video = fixture();
    for section in &mut video.transcript {
        for sentence in &mut section.sentences {
            sentence.selected = false;
        }
    }
    video
}

fn controller(start_in_highlights: bool) -> (PlaybackController, InMemoryPlayer) {
    let player = InMemoryPlayer::new(30.0);
    let handle = player.clone();
    (
        PlaybackController::new(fixture(), Box::new(player), start_in_highlights),
        handle,
    )
}

#[test]
fn test_initial_mode() {
    let (highlights, _) = controller(true);
    assert_eq!(highlights.mode(), PlaybackMode::Highlights);

    let (full, _) = controller(false);
    assert_eq!(full.mode(), PlaybackMode::Full);

    // Nothing to play in highlight mode
    let empty = PlaybackController::new(unselected_fixture(), Box::new(InMemoryPlayer::new(30.0)), true);
    assert_eq!(empty.mode(), PlaybackMode::Full);
}

#[test]
fn test_total_duration_per_mode() {
    let (mut controller, _) = controller(false);
    assert_eq!(controller.total_duration(), 30.0);

    controller.toggle_mode();
    assert_eq!(controller.total_duration(), 9.0);
}

#[test]
fn test_toggle_mode_without_selection_is_a_no_op() {
    let player = InMemoryPlayer::new(30.0);
    let handle = player.clone();
    let mut controller = PlaybackController::new(unselected_fixture(), Box::new(player), false);

    assert_eq!(controller.toggle_mode(), PlaybackMode::Full);
    assert!(handle.seek_log().is_empty());
}

#[test]
fn test_toggle_to_highlights_keeps_position() {
    let (mut controller, handle) = controller(false);
    controller.seek_to_display(21.0);

    assert_eq!(controller.toggle_mode(), PlaybackMode::Highlights);

    assert_eq!(controller.current_display_time(), 8.0);
    assert_eq!(controller.original_time(), 21.0);
    assert_eq!(handle.current_time(), 21.0);
}

#[test]
fn test_toggle_round_trip_inside_a_clip() {
    let (mut controller, _) = controller(false);
    controller.seek_to_display(5.5);

    controller.toggle_mode();
    assert!((controller.current_display_time() - 4.5).abs() < EPSILON);

    controller.toggle_mode();
    assert_eq!(controller.mode(), PlaybackMode::Full);
    assert!((controller.current_display_time() - 5.5).abs() < 1e-3);
}

#[test]
fn test_toggle_from_a_gap_snaps_to_a_clip_boundary() {
    let (mut controller, handle) = controller(false);
    controller.seek_to_display(15.0);

    controller.toggle_mode();
    assert_eq!(controller.current_display_time(), 7.0);
    assert_eq!(handle.current_time(), 15.0);

    // Back in full mode the player lands on clip-1's end
    controller.toggle_mode();
    assert_eq!(handle.current_time(), 8.0);
}

#[test]
fn test_highlight_seek_maps_to_original_time() {
    let (mut controller, handle) = controller(true);

    controller.seek_to_display(8.0);

    assert_eq!(handle.current_time(), 21.0);
    let state = controller.highlight_state();
    assert!(state.is_playing_highlights);
    assert_eq!(state.total_highlight_time, 9.0);
    assert_eq!(state.current_clip_index, 1);
    assert!((state.current_clip_time - 1.0).abs() < EPSILON);
}

#[test]
fn test_highlight_navigation() {
    let (mut controller, handle) = controller(true);

    assert_eq!(controller.next(), Some(1.0));
    assert_eq!(controller.next(), Some(5.0));
    assert_eq!(controller.next(), Some(20.0));
    assert_eq!(handle.current_time(), 20.0);

    assert_eq!(controller.previous(), Some(5.0));
    assert_eq!(controller.next(), Some(20.0));
    assert_eq!(controller.next(), Some(1.0));
}

#[test]
fn test_full_mode_navigation_stops_at_the_end() {
    let (mut controller, handle) = controller(false);

    assert_eq!(controller.next(), Some(1.0));
    assert_eq!(controller.next(), Some(5.0));
    assert_eq!(controller.next(), Some(20.0));
    assert_eq!(controller.next(), None);
    assert_eq!(handle.current_time(), 20.0);
}

#[test]
fn test_deselecting_everything_leaves_highlight_mode() -> Result<()> {
    let (mut controller, _) = controller(true);

    assert!(!controller.toggle_sentence("s1")?);
    assert!(!controller.toggle_sentence("s2")?);
    assert_eq!(controller.mode(), PlaybackMode::Highlights);

    assert!(!controller.toggle_sentence("s3")?);
    assert_eq!(controller.mode(), PlaybackMode::Full);
    assert!(controller.clips().is_empty());

    Ok(())
}

#[test]
fn test_selection_change_rebuilds_clips() -> Result<()> {
    let (mut controller, _) = controller(true);

    // x [10, 12] extends clip-1 but is still more than 5s from s3
    controller.toggle_sentence("x")?;
    let clips = controller.clips();
    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0].original_end_time, 12.0);
    assert_eq!(controller.total_duration(), 13.0);

    Ok(())
}

#[test]
fn test_toggle_unknown_sentence() {
    let (mut controller, _) = controller(true);

    assert_eq!(
        controller.toggle_sentence("nope"),
        Err(EditorError::UnknownSentence("nope".to_string()))
    );
}

#[test]
fn test_drag_pauses_and_does_not_resume() {
    let (mut controller, handle) = controller(true);
    controller.play();
    assert!(controller.is_playing());
    assert!(!handle.is_paused());

    controller.drag_start();
    assert!(controller.is_dragging());
    assert!(!controller.is_playing());
    assert!(handle.is_paused());

    controller.drag_to(8.0);
    assert_eq!(handle.current_time(), 21.0);

    controller.drag_end(8.5);
    assert_eq!(handle.current_time(), 21.5);
    assert!(!controller.is_dragging());
    assert!(!controller.is_playing());
}

#[test]
fn test_auto_advance_near_clip_end() {
    let (mut controller, handle) = controller(true);
    controller.play();
    controller.seek_to_display(6.9);
    assert_eq!(handle.current_time(), 7.9);

    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 7.9 });

    assert_eq!(handle.current_time(), 20.0);
    assert_eq!(controller.auto_advances(), 1);

    controller.handle_player_event(PlayerEvent::Seeked { time: 20.0 });
    assert!(controller.is_playing());
    assert!(!handle.is_paused());
    assert_eq!(controller.current_display_time(), 7.0);
}

#[test]
fn test_auto_advance_continues_when_seek_completion_is_lost() -> Result<()> {
    let (mut controller, handle) = controller(true);
    // Single clip: [1, 8]
    controller.toggle_sentence("s3")?;
    controller.play();

    // Near the end of the only clip: loop back to its start
    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 7.85 });
    assert_eq!(handle.seek_log(), vec![1.0]);

    // Duplicate ticks while that seek is in flight do not re-seek
    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 7.85 });
    assert_eq!(handle.seek_log(), vec![1.0]);

    // No Seeked event ever arrives; the verification check settles the seek
    let token = controller.take_pending_verification().expect("seek should await verification");
    controller.verify_seek(token);
    assert!(!handle.is_paused());

    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 7.85 });
    assert_eq!(handle.seek_log(), vec![1.0, 1.0]);

    let token = controller.take_pending_verification().expect("seek should await verification");
    controller.verify_seek(token);

    // Drifted into unselected footage after the clip
    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 15.0 });

    assert_eq!(handle.seek_log(), vec![1.0, 1.0, 1.0]);
    assert_eq!(controller.auto_advances(), 3);

    Ok(())
}

#[test]
fn test_auto_advance_out_of_unselected_footage() {
    let (mut controller, handle) = controller(true);
    controller.play();

    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 12.0 });

    assert_eq!(handle.seek_log(), vec![20.0]);
}

#[test]
fn test_no_auto_advance_when_paused_or_in_full_mode() {
    let (mut paused, paused_handle) = controller(true);
    paused.handle_player_event(PlayerEvent::TimeUpdate { time: 12.0 });
    assert!(paused_handle.seek_log().is_empty());

    let (mut full, full_handle) = controller(false);
    full.play();
    full.handle_player_event(PlayerEvent::TimeUpdate { time: 12.0 });
    assert!(full_handle.seek_log().is_empty());
    assert_eq!(full.original_time(), 12.0);
}

#[test]
fn test_no_auto_advance_while_dragging() {
    let (mut controller, handle) = controller(true);
    controller.play();
    controller.drag_start();

    controller.handle_player_event(PlayerEvent::TimeUpdate { time: 12.0 });

    assert!(handle.seek_log().is_empty());
    assert_eq!(controller.auto_advances(), 0);
}

#[test]
fn test_stale_seek_completion_is_ignored() {
    let (mut controller, _) = controller(true);

    controller.seek_to_display(1.0);
    controller.seek_to_display(5.0);
    assert_eq!(controller.original_time(), 6.0);

    // Completion for the first seek arrives late
    controller.handle_player_event(PlayerEvent::Seeked { time: 2.0 });

    assert_eq!(controller.original_time(), 6.0);
    assert_eq!(controller.seek_stats().stale_completions, 1);
}

#[test]
fn test_ignored_seek_is_retried_once() {
    let (mut controller, handle) = controller(true);
    handle.ignore_next_seeks(1);

    assert_eq!(controller.next(), Some(1.0));
    assert_eq!(handle.current_time(), 0.0);

    let token = controller.take_pending_verification().expect("seek should await verification");
    controller.verify_seek(token);

    assert_eq!(handle.current_time(), 1.0);
    assert_eq!(handle.seek_log(), vec![1.0, 1.0]);
    let stats = controller.seek_stats();
    assert_eq!(stats.seek_retries, 1);
    assert_eq!(stats.unconverged_seeks, 0);
}

#[test]
fn test_unconverged_seek_keeps_requested_time() {
    let (mut controller, handle) = controller(true);
    handle.ignore_next_seeks(2);

    controller.next();
    let token = controller.take_pending_verification().expect("seek should await verification");
    controller.verify_seek(token);

    assert_eq!(handle.current_time(), 0.0);
    assert_eq!(controller.original_time(), 1.0);
    assert_eq!(controller.seek_stats().unconverged_seeks, 1);

    // No second retry
    controller.verify_seek(token);
    assert_eq!(handle.seek_log().len(), 2);
}

#[test]
fn test_rejected_play_leaves_controller_paused() {
    let (mut controller, handle) = controller(true);
    handle.reject_play(true);

    controller.play();

    assert!(!controller.is_playing());
    assert!(handle.is_paused());
}

#[test]
fn test_metadata_loaded_seeks_to_start() {
    let (mut highlights, highlights_handle) = controller(true);
    highlights.handle_player_event(PlayerEvent::MetadataLoaded { duration: 30.0 });
    assert_eq!(highlights_handle.seek_log(), vec![1.0]);

    let (mut full, full_handle) = controller(false);
    full.handle_player_event(PlayerEvent::MetadataLoaded { duration: 30.0 });
    assert_eq!(full_handle.seek_log(), vec![0.0]);
}

#[test]
fn test_seek_to_sentence_and_caption() -> Result<()> {
    let (mut controller, handle) = controller(false);

    controller.seek_to_sentence("x")?;
    assert_eq!(handle.current_time(), 10.0);
    assert_eq!(controller.current_caption(), Some("An aside nobody needs."));

    controller.seek_to_display(15.0);
    assert_eq!(controller.current_caption(), None);

    assert_eq!(
        controller.seek_to_sentence("missing"),
        Err(EditorError::UnknownSentence("missing".to_string()))
    );

    Ok(())
}

#[test]
fn test_full_mode_markers() {
    let (controller, _) = controller(false);

    let markers = controller.timeline_markers();
    let ids: Vec<&str> = markers.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s3", "s2", "y"]);

    let s1 = &markers[0];
    assert!((s1.left_percent - 100.0 / 30.0).abs() < EPSILON);
    assert!((s1.width_percent - 200.0 / 30.0).abs() < EPSILON);
    assert!(!s1.suggested);
    assert!(markers[3].suggested);
}

#[test]
fn test_highlight_markers() {
    let (controller, _) = controller(true);

    let markers = controller.timeline_markers();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].id, "clip-1");
    assert_eq!(markers[0].left_percent, 0.0);
    assert!((markers[0].width_percent - 700.0 / 9.0).abs() < EPSILON);
    assert!((markers[1].left_percent - 700.0 / 9.0).abs() < EPSILON);
    assert!((markers[1].width_percent - 200.0 / 9.0).abs() < EPSILON);
}

#[test]
fn test_timeline_position_and_progress() {
    let (mut controller, _) = controller(true);

    assert_eq!(controller.position_to_time(0.5), 4.5);
    assert_eq!(controller.position_to_time(2.0), 9.0);
    assert_eq!(controller.position_to_time(-1.0), 0.0);

    controller.seek_to_display(4.5);
    assert!((controller.progress_percent() - 50.0).abs() < EPSILON);
}
