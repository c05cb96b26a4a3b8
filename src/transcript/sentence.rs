use serde::{Deserialize, Serialize};

/// Atomic transcript unit with a time span in original-video seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub id: String,

    /// Start in original-video seconds
    pub start_time: f64,

    /// End in original-video seconds, strictly after `start_time`
    pub end_time: f64,

    pub text: String,

    #[serde(default)]
    pub selected: bool,

    #[serde(default)]
    pub suggested: bool,
}

impl Sentence {
    pub fn new(id: impl Into<String>, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            text: text.into(),
            selected: false,
            suggested: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Half-open containment: `[start_time, end_time)`
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }
}

/// Titled group of sentences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub sentences: Vec<Sentence>,
}
