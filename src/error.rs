use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Sentence {id} has an invalid span: start {start}s is not before end {end}s")]
    InvalidSentenceSpan { id: String, start: f64, end: f64 },

    #[error("Sentence id {0} appears more than once in the transcript")]
    DuplicateSentenceId(String),

    #[error("Unknown sentence: {0}")]
    UnknownSentence(String),

    #[error("Video duration must be positive, got {0}")]
    InvalidDuration(f64),

    #[error("Invalid time format: {0} (expected MM:SS or MM:SS.mmm)")]
    InvalidTimeFormat(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
