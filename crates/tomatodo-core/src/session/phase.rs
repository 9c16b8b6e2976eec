use serde::{Deserialize, Serialize};

pub const WORK_MIN: u32 = 25;
pub const SHORT_BREAK_MIN: u32 = 5;
pub const LONG_BREAK_MIN: u32 = 20;

/// Color role a phase label is rendered with. The render sink maps these to
/// whatever its medium supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Pink,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Phase for the given repetition count (1-based).
    ///
    /// The long break fires only at the literal count 8; the rule is never
    /// re-armed, so counts past 8 alternate work/short-break indefinitely.
    pub fn for_repetition(repetition: u32) -> Self {
        if repetition == 8 {
            Phase::LongBreak
        } else if repetition % 2 == 0 {
            Phase::ShortBreak
        } else {
            Phase::Work
        }
    }

    pub fn duration_min(self) -> u32 {
        match self {
            Phase::Work => WORK_MIN,
            Phase::ShortBreak => SHORT_BREAK_MIN,
            Phase::LongBreak => LONG_BREAK_MIN,
        }
    }

    pub fn duration_secs(self) -> u32 {
        self.duration_min() * 60
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn color(self) -> ColorToken {
        match self {
            Phase::Work => ColorToken::Green,
            Phase::ShortBreak => ColorToken::Pink,
            Phase::LongBreak => ColorToken::Red,
        }
    }
}

/// Zero-padded `mm:ss` rendering of a remaining-seconds value.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
