use anyhow::Result;
use clap::Parser;
use highlight_reel::format::{format_duration, format_time_with_millis};
use highlight_reel::{
    build_clips, to_highlight_time, to_original_time, Config, EditorIntent, EditorSession,
    InMemoryPlayer, VideoData,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replay a short editing session against a simulated player
#[derive(Debug, Parser)]
#[command(name = "highlight-reel", version)]
struct Args {
    /// Config file (extension optional)
    #[arg(long, default_value = "config/highlight-reel")]
    config: String,

    /// Transcript JSON, overriding `transcript.path`
    #[arg(long)]
    transcript: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let transcript_path = args.transcript.unwrap_or_else(|| cfg.transcript.path.clone());
    let mut video = VideoData::from_json_file(&transcript_path)?;
    if cfg.transcript.apply_suggestions {
        video.apply_suggestions();
    }

    let clips = build_clips(&video.selected_sentences());
    info!(
        "{} suggested highlights, {} clips",
        video.suggested_count(),
        clips.len()
    );
    for clip in &clips {
        info!(
            "{}: original {} - {} -> highlight {} - {} ({} sentences)",
            clip.id,
            format_time_with_millis(clip.original_start_time),
            format_time_with_millis(clip.original_end_time),
            format_time_with_millis(clip.start_time),
            format_time_with_millis(clip.end_time),
            clip.sentences.len()
        );
    }

    if let Some(clip) = clips.last() {
        let probe = clip.original_start_time + clip.duration() / 2.0;
        let highlight = to_highlight_time(probe, &clips);
        info!(
            "Mapping check: original {:.3}s -> highlight {:.3}s -> original {:.3}s",
            probe,
            highlight,
            to_original_time(highlight, &clips)
        );
    }

    let session_config = cfg.session_config();
    let event_buffer = session_config.event_buffer;

    let player = InMemoryPlayer::new(video.duration).with_event_buffer(event_buffer);
    let clock = player.clone();
    // Held by the player until the session subscribes to its events
    clock.load_metadata();

    let session = EditorSession::new(session_config, video, Box::new(player));
    info!(
        "Video {} / highlights {}",
        format_duration(session.controller().video().duration),
        format_duration(session.controller().total_duration())
    );

    let (tx, rx) = mpsc::channel(event_buffer);
    let task = tokio::spawn(session.run(rx));

    tx.send(EditorIntent::Play).await?;

    // Play through the reel at 4 ticks per second of media time
    for _ in 0..80 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        clock.advance(0.25);
    }

    tx.send(EditorIntent::Pause).await?;
    for intent in [
        EditorIntent::Next,
        EditorIntent::Next,
        EditorIntent::Previous,
        EditorIntent::ToggleMode,
        EditorIntent::Next,
    ] {
        tx.send(intent).await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    drop(tx);
    let stats = task.await??;

    info!("Session stats:\n{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
