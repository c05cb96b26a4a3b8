use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::format::round_to_millisecond;
use crate::player::MediaPlayer;

/// A seek is considered applied once the player reports a position this close
pub const SEEK_CONVERGENCE_SECS: f64 = 0.1;

/// Identifies one seek request; newer requests get larger tokens
pub type SeekToken = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSeek {
    pub token: SeekToken,
    /// Requested position, rounded to the millisecond
    pub target: f64,
    /// Re-issue `play()` once the seek completes
    pub resume_playback: bool,
    retried: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerifyOutcome {
    /// Nothing pending under this token: completed or superseded
    Settled,
    /// The player already reports the requested position
    Converged { reported: f64 },
    /// The single retry brought the player to the requested position
    Corrected { reported: f64 },
    /// Still off after the retry; callers keep the requested time
    Unconverged { requested: f64, reported: f64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekStats {
    pub seeks_issued: u64,
    pub seek_retries: u64,
    pub unconverged_seeks: u64,
    pub stale_completions: u64,
}

/// Issues seeks against the player and reconciles their completion
///
/// Only the newest request is tracked. A completion or verification for an
/// older request is ignored so it cannot overwrite newer navigation state.
#[derive(Debug, Default)]
pub struct Seeker {
    last_token: SeekToken,
    pending: Option<PendingSeek>,
    verification_due: Option<SeekToken>,
    stats: SeekStats,
}

impl Seeker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a seek to `target` (rounded to the millisecond) and return
    /// the rounded target. A player error is logged and otherwise ignored.
    pub fn seek(&mut self, player: &mut dyn MediaPlayer, target: f64, resume_playback: bool) -> f64 {
        let target = round_to_millisecond(target);
        self.last_token += 1;
        let token = self.last_token;

        debug!("Seek #{} to {:.3}s via {}", token, target, player.name());

        if let Err(e) = player.set_current_time(target) {
            warn!("Seek #{} to {:.3}s failed: {}", token, target, e);
        }

        if let Some(previous) = self.pending.replace(PendingSeek {
            token,
            target,
            resume_playback,
            retried: false,
        }) {
            debug!("Seek #{} superseded by #{}", previous.token, token);
        }

        self.verification_due = Some(token);
        self.stats.seeks_issued += 1;

        target
    }

    /// Token of the newest seek still awaiting its verification check.
    /// Returned once per seek.
    pub fn take_verification_due(&mut self) -> Option<SeekToken> {
        self.verification_due.take()
    }

    pub fn pending(&self) -> Option<&PendingSeek> {
        self.pending.as_ref()
    }

    /// True when the newest pending seek already targets `target`
    pub fn is_pending_to(&self, target: f64) -> bool {
        self.pending
            .is_some_and(|p| (p.target - round_to_millisecond(target)).abs() <= SEEK_CONVERGENCE_SECS)
    }

    /// Re-check a seek after the verification delay, retrying once
    pub fn verify(&mut self, player: &mut dyn MediaPlayer, token: SeekToken) -> VerifyOutcome {
        let Some(pending) = self.pending.filter(|p| p.token == token) else {
            return VerifyOutcome::Settled;
        };

        // A converged seek is settled even if its completion event never arrives
        let reported = player.current_time();
        if (reported - pending.target).abs() <= SEEK_CONVERGENCE_SECS {
            self.pending = None;
            return VerifyOutcome::Converged { reported };
        }

        if pending.retried {
            return VerifyOutcome::Unconverged {
                requested: pending.target,
                reported,
            };
        }

        info!(
            "Seek #{} did not take effect (at {:.3}s, wanted {:.3}s), retrying",
            token, reported, pending.target
        );
        self.stats.seek_retries += 1;
        if let Err(e) = player.set_current_time(pending.target) {
            warn!("Seek #{} retry failed: {}", token, e);
        }
        if let Some(p) = self.pending.as_mut() {
            p.retried = true;
        }

        let reported = player.current_time();
        if (reported - pending.target).abs() <= SEEK_CONVERGENCE_SECS {
            self.pending = None;
            VerifyOutcome::Corrected { reported }
        } else {
            warn!(
                "Seek #{} still unconverged after retry (at {:.3}s, wanted {:.3}s)",
                token, reported, pending.target
            );
            self.stats.unconverged_seeks += 1;
            self.pending = None;
            VerifyOutcome::Unconverged {
                requested: pending.target,
                reported,
            }
        }
    }

    /// Match a seek-completed event against the newest request.
    ///
    /// Returns the request it completes, or `None` for a completion that
    /// belongs to a superseded seek (or arrives with nothing pending).
    pub fn complete(&mut self, reported: f64) -> Option<PendingSeek> {
        let pending = self.pending?;

        if (reported - pending.target).abs() <= SEEK_CONVERGENCE_SECS {
            self.pending = None;
            debug!("Seek #{} completed at {:.3}s", pending.token, reported);
            return Some(pending);
        }

        debug!(
            "Ignoring stale seek completion at {:.3}s (waiting on #{} to {:.3}s)",
            reported, pending.token, pending.target
        );
        self.stats.stale_completions += 1;
        None
    }

    pub fn stats(&self) -> SeekStats {
        self.stats
    }
}
