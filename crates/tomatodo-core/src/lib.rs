//! # Tomatodo Core Library
//!
//! Core logic for the Tomatodo pomodoro timer: a session state machine that
//! sequences Work / Short Break / Long Break intervals, a tick-driven
//! countdown, and a todo ledger whose entries are promoted to a completed
//! log during the review checkpoint that follows every finished work
//! interval.
//!
//! ## Architecture
//!
//! - **Session machine**: phase sequencing, pause/resume, and the
//!   review-gate handoff. Caller-driven -- the host delivers one tick per
//!   second; there are no internal threads.
//! - **Countdown**: generation-tokened decrementing counter; stale ticks
//!   from cancelled runs are discarded.
//! - **Todo ledger**: pending set plus append-only completed log, stamped
//!   with work-interval bounds.
//! - **Runner**: wires machine, ledger and the render/alarm sinks together
//!   and enforces the completion ordering.
//!
//! All state is in-memory for the process lifetime; there is no persistence
//! and no network.

pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod runner;
pub mod session;
pub mod sinks;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AlarmError, ConfigError};
pub use events::Event;
pub use ledger::{CompletedTodo, TodoItem, TodoLedger};
pub use runner::SessionRunner;
pub use session::{
    format_mmss, ColorToken, Countdown, MachineState, Phase, ReviewRequest, Session,
    SessionMachine, TickOutcome, TickToken,
};
pub use sinks::{AlarmSink, NoopAlarm, NoopRender, RenderSink};
