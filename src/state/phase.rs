//! Timer phases and their durations

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};

/// Number of completed pomodoros that earns a long break
pub const POMODOROS_PER_LONG_BREAK: u32 = 4;

/// The three phases a pomodoro cycle moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Wire name used in `current_mode`
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pomodoro => "pomodoro",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    /// Break that follows the `completed`-th finished pomodoro
    pub fn break_after(completed: u32) -> Phase {
        if completed % POMODOROS_PER_LONG_BREAK == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed length of each phase, chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub pomodoro: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
}

impl PhaseDurations {
    /// Build durations from whole minutes, saturating on overflow
    pub fn from_minutes(pomodoro: u64, short_break: u64, long_break: u64) -> Self {
        Self {
            pomodoro: Duration::from_secs(pomodoro.saturating_mul(60)),
            short_break: Duration::from_secs(short_break.saturating_mul(60)),
            long_break: Duration::from_secs(long_break.saturating_mul(60)),
        }
    }

    /// Build durations from whole seconds
    pub fn from_secs(pomodoro: u64, short_break: u64, long_break: u64) -> Self {
        Self {
            pomodoro: Duration::from_secs(pomodoro),
            short_break: Duration::from_secs(short_break),
            long_break: Duration::from_secs(long_break),
        }
    }

    /// Divide every duration by `divisor`
    pub fn scaled_down(&self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        Self {
            pomodoro: self.pomodoro / divisor,
            short_break: self.short_break / divisor,
            long_break: self.long_break / divisor,
        }
    }

    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Pomodoro => self.pomodoro,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    /// Whole seconds a phase starts with
    pub fn seconds(&self, phase: Phase) -> i64 {
        i64::try_from(self.for_phase(phase).as_secs()).unwrap_or(i64::MAX)
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15)
    }
}
