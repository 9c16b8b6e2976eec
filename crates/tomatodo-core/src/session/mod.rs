mod countdown;
mod machine;
mod phase;

pub use countdown::{Countdown, TickOutcome, TickToken};
pub use machine::{MachineState, ReviewRequest, Session, SessionMachine};
pub use phase::{
    format_mmss, ColorToken, Phase, LONG_BREAK_MIN, SHORT_BREAK_MIN, WORK_MIN,
};
