use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::sentence::{Section, Sentence};
use crate::error::EditorError;

/// Root aggregate for one ingested video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    pub url: String,

    /// Full video duration in seconds
    pub duration: f64,

    pub transcript: Vec<Section>,

    /// Sentence ids proposed as highlights by the ingestion step
    #[serde(default)]
    pub suggested_highlights: Vec<String>,
}

impl VideoData {
    /// Load and validate a VideoData JSON document
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading transcript: {}", path.display());

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript file {}", path.display()))?;
        let data: Self = serde_json::from_str(&raw).context("Failed to parse transcript JSON")?;
        data.validate().context("Transcript failed validation")?;

        info!(
            "Transcript loaded: {} sections, {} sentences, {:.1}s",
            data.transcript.len(),
            data.sentences().count(),
            data.duration
        );

        Ok(data)
    }

    /// Check the input-shape contract the timeline engine relies on
    pub fn validate(&self) -> Result<(), EditorError> {
        if !(self.duration > 0.0) {
            return Err(EditorError::InvalidDuration(self.duration));
        }

        let mut seen = HashSet::new();
        for sentence in self.sentences() {
            if !(sentence.start_time >= 0.0 && sentence.start_time < sentence.end_time) {
                return Err(EditorError::InvalidSentenceSpan {
                    id: sentence.id.clone(),
                    start: sentence.start_time,
                    end: sentence.end_time,
                });
            }
            if !seen.insert(sentence.id.as_str()) {
                return Err(EditorError::DuplicateSentenceId(sentence.id.clone()));
            }
        }

        Ok(())
    }

    /// All sentences in transcript order (not necessarily sorted by time)
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.transcript.iter().flat_map(|section| section.sentences.iter())
    }

    pub fn sentence(&self, id: &str) -> Option<&Sentence> {
        self.sentences().find(|s| s.id == id)
    }

    /// Selected sentences across all sections, stable-sorted by start time
    pub fn selected_sentences(&self) -> Vec<Sentence> {
        let mut selected: Vec<Sentence> = self.sentences().filter(|s| s.selected).cloned().collect();
        selected.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        selected
    }

    pub fn has_selection(&self) -> bool {
        self.sentences().any(|s| s.selected)
    }

    /// Flip a sentence's selection flag, returning the new value
    pub fn toggle_sentence(&mut self, id: &str) -> Result<bool, EditorError> {
        let sentence = self
            .transcript
            .iter_mut()
            .flat_map(|section| section.sentences.iter_mut())
            .find(|s| s.id == id)
            .ok_or_else(|| EditorError::UnknownSentence(id.to_string()))?;

        sentence.selected = !sentence.selected;
        debug!("Sentence {} selected={}", id, sentence.selected);

        Ok(sentence.selected)
    }

    /// Mark suggested highlights and select them
    pub fn apply_suggestions(&mut self) {
        let suggested: HashSet<&str> = self.suggested_highlights.iter().map(String::as_str).collect();
        let mut applied = 0;

        for sentence in self
            .transcript
            .iter_mut()
            .flat_map(|section| section.sentences.iter_mut())
        {
            if suggested.contains(sentence.id.as_str()) {
                sentence.suggested = true;
                sentence.selected = true;
                applied += 1;
            }
        }

        info!("Applied {} suggested highlights", applied);
    }

    pub fn suggested_count(&self) -> usize {
        self.sentences().filter(|s| s.suggested).count()
    }

    /// Sentence whose `[start, end)` span contains `original_time`
    pub fn sentence_at(&self, original_time: f64) -> Option<&Sentence> {
        self.sentences().find(|s| s.contains(original_time))
    }
}
