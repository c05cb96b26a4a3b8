//! Transcript data model
//!
//! `VideoData` is the root aggregate handed over by the ingestion step. The
//! only mutation after ingestion is toggling a sentence's `selected` flag.

mod sentence;
mod video;

pub use sentence::{Section, Sentence};
pub use video::VideoData;
