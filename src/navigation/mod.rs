//! Next/previous navigation and seek issuance
//!
//! `engine` picks targets from the selection and the current position;
//! `seek` applies them to the player with a single verification retry.

pub mod engine;
pub mod seek;

pub use engine::{
    auto_advance_target, next_clip_target, next_sentence_target, next_target, previous_clip_target,
    previous_sentence_target, previous_target, CLIP_END_LEAD_SECS, CLIP_TOLERANCE_SECS,
    SENTENCE_TOLERANCE_SECS,
};
pub use seek::{PendingSeek, SeekStats, SeekToken, Seeker, VerifyOutcome, SEEK_CONVERGENCE_SECS};
