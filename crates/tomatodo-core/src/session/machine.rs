//! Session state machine.
//!
//! Owns the phase sequencing, the repetition count and the pause/resume
//! semantics. It holds no timer thread -- the host delivers one tick per
//! second through [`SessionMachine::tick`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v  (work interval completes)
//!     AwaitingReview -> Idle (finish_review)
//! ```
//!
//! `AwaitingReview` is the deferred continuation behind the todo review
//! checkpoint: a finished work interval parks the machine there and `start`
//! is inert until [`SessionMachine::finish_review`] releases it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::countdown::{Countdown, TickOutcome, TickToken};
use super::phase::Phase;
use crate::clock::Clock;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    Idle,
    Running,
    Paused,
    /// A work interval finished; held until the review checkpoint commits.
    AwaitingReview,
}

/// Mutable session state for one timer run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Intervals started since the last reset. Never decreases except via
    /// reset; determines the next phase.
    pub repetition_count: u32,
    /// Unset until the first start.
    pub current_phase: Option<Phase>,
    /// Authoritative countdown state; survives pause.
    pub remaining_secs: u32,
    /// Set only when a *new* work interval begins, not on resume.
    pub work_started_at: Option<DateTime<Utc>>,
}

/// Bounds of the work interval a review pass is committing against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionMachine<C: Clock> {
    clock: C,
    state: MachineState,
    session: Session,
    countdown: Countdown,
    /// Only set while in `AwaitingReview`.
    review: Option<ReviewRequest>,
}

impl<C: Clock> SessionMachine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: MachineState::Idle,
            session: Session::default(),
            countdown: Countdown::new(),
            review: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `floor(repetition_count / 2)` -- one mark per finished work interval.
    pub fn checkmarks(&self) -> u32 {
        self.session.repetition_count / 2
    }

    /// Token for the armed countdown run; the host passes it back on each
    /// scheduled tick so stale callbacks can be told apart from live ones.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.countdown.token()
    }

    pub fn review_request(&self) -> Option<&ReviewRequest> {
        self.review.as_ref()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            repetition: self.session.repetition_count,
            phase: self.session.current_phase,
            remaining_secs: self.session.remaining_secs,
            checkmarks: self.checkmarks(),
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new interval, or resume a paused one.
    ///
    /// From `Idle` this advances the repetition count, derives the phase and
    /// full duration from it, and (for work) stamps `work_started_at`. From
    /// `Paused` it re-arms the countdown with the captured remaining time and
    /// touches neither the count nor the phase. Inert while `Running` or
    /// `AwaitingReview`.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            MachineState::Running | MachineState::AwaitingReview => None,
            MachineState::Paused => {
                let phase = self.session.current_phase?;
                self.countdown.arm(self.session.remaining_secs);
                self.state = MachineState::Running;
                Some(Event::SessionResumed {
                    phase,
                    remaining_secs: self.session.remaining_secs,
                    at: self.clock.now(),
                })
            }
            MachineState::Idle => {
                self.session.repetition_count += 1;
                let phase = Phase::for_repetition(self.session.repetition_count);
                if phase == Phase::Work {
                    self.session.work_started_at = Some(self.clock.now());
                }
                self.session.current_phase = Some(phase);
                self.session.remaining_secs = phase.duration_secs();
                self.countdown.arm(phase.duration_secs());
                self.state = MachineState::Running;
                Some(Event::SessionStarted {
                    repetition: self.session.repetition_count,
                    phase,
                    duration_secs: phase.duration_secs(),
                    at: self.clock.now(),
                })
            }
        }
    }

    /// Pause the running interval, capturing the remaining time for resume.
    /// No-op unless running.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != MachineState::Running {
            return None;
        }
        self.session.remaining_secs = self.countdown.cancel();
        self.state = MachineState::Paused;
        Some(Event::SessionPaused {
            remaining_secs: self.session.remaining_secs,
            at: self.clock.now(),
        })
    }

    /// Return to the initial idle state. Permitted from any state; cancels
    /// any armed countdown so no stale completion can fire. Idempotent.
    pub fn reset(&mut self) -> Event {
        self.countdown.cancel();
        self.session = Session::default();
        self.review = None;
        self.state = MachineState::Idle;
        Event::SessionReset {
            at: self.clock.now(),
        }
    }

    /// Deliver one scheduled tick. Spurious ticks (stale token, or delivered
    /// while not running) are discarded and mutate nothing.
    ///
    /// Returns `Some(Event::PhaseCompleted)` when the interval reaches zero.
    /// A completed work interval additionally parks the machine in
    /// `AwaitingReview`; any other phase leaves it `Idle` so the caller can
    /// immediately start the next interval.
    pub fn tick(&mut self, token: TickToken) -> Option<Event> {
        if self.state != MachineState::Running {
            return None;
        }
        match self.countdown.tick(token)? {
            TickOutcome::Remaining(secs) => {
                self.session.remaining_secs = secs;
                None
            }
            TickOutcome::Completed => {
                self.session.remaining_secs = 0;
                let phase = self.session.current_phase?;
                let now = self.clock.now();
                if phase == Phase::Work {
                    self.state = MachineState::AwaitingReview;
                    self.review = Some(ReviewRequest {
                        started_at: self.session.work_started_at.unwrap_or(now),
                        ended_at: now,
                    });
                } else {
                    self.state = MachineState::Idle;
                }
                Some(Event::PhaseCompleted {
                    repetition: self.session.repetition_count,
                    phase,
                    checkmarks: self.checkmarks(),
                    at: now,
                })
            }
        }
    }

    /// Release the machine after a review pass. Returns the work interval
    /// bounds the ledger commit should be stamped with. `None` unless in
    /// `AwaitingReview`.
    pub fn finish_review(&mut self) -> Option<ReviewRequest> {
        if self.state != MachineState::AwaitingReview {
            return None;
        }
        self.state = MachineState::Idle;
        self.review.take()
    }
}
