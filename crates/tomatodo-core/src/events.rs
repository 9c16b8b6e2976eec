use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{MachineState, Phase};

/// Every externally observable state change produces an Event.
/// The CLI consumes them for display; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new interval began (repetition count advanced).
    SessionStarted {
        repetition: u32,
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A paused interval resumed from its captured remaining time.
    SessionResumed {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// An interval counted down to zero.
    PhaseCompleted {
        repetition: u32,
        phase: Phase,
        checkmarks: u32,
        at: DateTime<Utc>,
    },
    /// A work interval finished; the machine is held until the review
    /// checkpoint commits.
    ReviewRequested {
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// The review checkpoint committed (possibly zero items).
    ReviewCommitted {
        completed: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: MachineState,
        repetition: u32,
        phase: Option<Phase>,
        remaining_secs: u32,
        checkmarks: u32,
        at: DateTime<Utc>,
    },
}
