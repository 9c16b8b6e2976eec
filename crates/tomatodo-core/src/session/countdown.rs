//! Tick-driven countdown.
//!
//! The countdown holds no timer of its own -- the host schedules a tick once
//! per second and delivers it here. Each `arm` hands out a [`TickToken`]
//! carrying a generation number; a tick whose token does not match the
//! currently armed generation (the run was cancelled or re-armed in the
//! meantime) is spurious and is discarded without touching state. At most one
//! run is armed at a time: arming implicitly cancels the previous run.

use serde::{Deserialize, Serialize};

/// Handle for one armed countdown run. Goes stale on cancel or re-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented by one; counting continues.
    Remaining(u32),
    /// Reached zero. Fires exactly once per run.
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: u32,
    generation: u64,
    armed: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a fresh run of `total_secs`. Any prior run is implicitly
    /// cancelled: its token goes stale.
    pub fn arm(&mut self, total_secs: u32) -> TickToken {
        self.generation += 1;
        self.remaining_secs = total_secs;
        self.armed = true;
        TickToken {
            generation: self.generation,
        }
    }

    /// Stop delivery without firing completion. Returns the last remaining
    /// value; the caller keeps it as resumable state.
    pub fn cancel(&mut self) -> u32 {
        self.armed = false;
        self.remaining_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Token for the currently armed run, if any.
    pub fn token(&self) -> Option<TickToken> {
        self.armed.then_some(TickToken {
            generation: self.generation,
        })
    }

    /// Deliver one scheduled tick. Returns `None` for spurious ticks: stale
    /// tokens, or delivery after cancel/completion.
    pub fn tick(&mut self, token: TickToken) -> Option<TickOutcome> {
        if !self.armed || token.generation != self.generation {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.armed = false;
            Some(TickOutcome::Completed)
        } else {
            Some(TickOutcome::Remaining(self.remaining_secs))
        }
    }
}
