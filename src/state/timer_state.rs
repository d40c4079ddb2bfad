//! Timer state structure and the pomodoro state machine

use std::time::Duration;
use tokio::time::Instant;

use super::{Phase, PhaseDurations};

/// Minimum wall-clock time between two decrements
pub const SECOND: Duration = Duration::from_secs(1);

/// Shared countdown state. Only ever touched under the `AppState` lock.
#[derive(Debug, Clone)]
pub struct TimerState {
    pub phase: Phase,
    /// Seconds left in the phase, briefly non-positive before a transition
    pub remaining_time: i64,
    pub pomodoro_count: u32,
    pub running: bool,
    pub last_update: Instant,
    pub background_image: Option<String>,
    /// Generation of the only tick task allowed to advance this state
    pub ticker_generation: u64,
}

/// Result of a single tick of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, or less than a second since the last update
    Idle,
    Decremented { remaining_time: i64 },
    PhaseCompleted { from: Phase, to: Phase, pomodoro_count: u32 },
}

/// Immutable copy of the timer handed out to readers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_time: i64,
    pub pomodoro_count: u32,
    pub running: bool,
    pub last_update: Instant,
    pub background_image: Option<String>,
}

impl TimerState {
    /// Create a paused timer at the start of a pomodoro
    pub fn new(durations: &PhaseDurations, background_image: Option<String>, now: Instant) -> Self {
        Self {
            phase: Phase::Pomodoro,
            remaining_time: durations.seconds(Phase::Pomodoro),
            pomodoro_count: 0,
            running: false,
            last_update: now,
            background_image,
            ticker_generation: 0,
        }
    }

    /// Return to a fresh, paused pomodoro. The background image is kept.
    pub fn reset(&mut self, durations: &PhaseDurations, now: Instant) {
        self.phase = Phase::Pomodoro;
        self.remaining_time = durations.seconds(Phase::Pomodoro);
        self.pomodoro_count = 0;
        self.running = false;
        self.last_update = now;
    }

    /// Apply at most one whole-second decrement, moving to the next phase
    /// when the current one runs out.
    pub fn tick(&mut self, durations: &PhaseDurations, now: Instant) -> TickOutcome {
        if !self.running || now.saturating_duration_since(self.last_update) < SECOND {
            return TickOutcome::Idle;
        }

        self.remaining_time -= 1;
        self.last_update = now;

        if self.remaining_time <= 0 {
            let from = self.phase;
            let to = self.complete_phase(durations, now);
            TickOutcome::PhaseCompleted { from, to, pomodoro_count: self.pomodoro_count }
        } else {
            TickOutcome::Decremented { remaining_time: self.remaining_time }
        }
    }

    /// Finish the current phase and enter the next one, returning it
    pub fn complete_phase(&mut self, durations: &PhaseDurations, now: Instant) -> Phase {
        let next = match self.phase {
            Phase::Pomodoro => {
                self.pomodoro_count += 1;
                Phase::break_after(self.pomodoro_count)
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Pomodoro,
        };

        self.enter(next, durations);
        self.last_update = now;
        next
    }

    /// Force a phase change. Breaks can always be entered; going back to a
    /// pomodoro only works from a break. Returns whether the phase changed.
    pub fn switch_phase(&mut self, target: Phase, durations: &PhaseDurations, now: Instant) -> bool {
        match target {
            Phase::ShortBreak | Phase::LongBreak => {
                self.enter(target, durations);
                true
            }
            Phase::Pomodoro => {
                if !self.phase.is_break() {
                    return false;
                }
                self.enter(Phase::Pomodoro, durations);
                if self.running {
                    self.last_update = now;
                }
                true
            }
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_time: self.remaining_time,
            pomodoro_count: self.pomodoro_count,
            running: self.running,
            last_update: self.last_update,
            background_image: self.background_image.clone(),
        }
    }

    fn enter(&mut self, phase: Phase, durations: &PhaseDurations) {
        self.phase = phase;
        self.remaining_time = durations.seconds(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations() -> PhaseDurations {
        PhaseDurations::from_secs(25, 5, 15)
    }

    fn running_timer(now: Instant) -> TimerState {
        let mut timer = TimerState::new(&durations(), None, now);
        timer.running = true;
        timer
    }

    #[test]
    fn test_paused_timer_never_decrements() {
        let now = Instant::now();
        let mut timer = TimerState::new(&durations(), None, now);

        assert_eq!(timer.tick(&durations(), now + Duration::from_secs(5)), TickOutcome::Idle);
        assert_eq!(timer.remaining_time, 25);
    }

    #[test]
    fn test_decrement_needs_a_whole_second() {
        let now = Instant::now();
        let mut timer = running_timer(now);

        assert_eq!(timer.tick(&durations(), now + Duration::from_millis(900)), TickOutcome::Idle);
        assert_eq!(
            timer.tick(&durations(), now + SECOND),
            TickOutcome::Decremented { remaining_time: 24 }
        );
        assert_eq!(timer.last_update, now + SECOND);
    }

    #[test]
    fn test_no_catch_up_after_long_delay() {
        let now = Instant::now();
        let mut timer = running_timer(now);

        timer.tick(&durations(), now + Duration::from_secs(10));
        assert_eq!(timer.remaining_time, 24);
    }

    #[test]
    fn test_pomodoro_completion_enters_short_break() {
        let now = Instant::now();
        let mut timer = running_timer(now);
        timer.remaining_time = 1;

        let later = now + SECOND;
        assert_eq!(
            timer.tick(&durations(), later),
            TickOutcome::PhaseCompleted { from: Phase::Pomodoro, to: Phase::ShortBreak, pomodoro_count: 1 }
        );
        assert_eq!(timer.remaining_time, 5);
        assert_eq!(timer.last_update, later);
    }

    #[test]
    fn test_fourth_pomodoro_enters_long_break() {
        let now = Instant::now();
        let mut timer = running_timer(now);
        timer.pomodoro_count = 3;
        timer.remaining_time = 0;

        timer.tick(&durations(), now + SECOND);

        assert_eq!(timer.phase, Phase::LongBreak);
        assert_eq!(timer.pomodoro_count, 4);
        assert_eq!(timer.remaining_time, 15);
    }

    #[test]
    fn test_break_completion_returns_to_pomodoro() {
        let now = Instant::now();
        let mut timer = running_timer(now);
        timer.phase = Phase::LongBreak;
        timer.pomodoro_count = 4;
        timer.remaining_time = 1;

        timer.tick(&durations(), now + SECOND);

        assert_eq!(timer.phase, Phase::Pomodoro);
        assert_eq!(timer.pomodoro_count, 4);
        assert_eq!(timer.remaining_time, 25);
    }

    #[test]
    fn test_switch_to_pomodoro_is_noop_in_pomodoro() {
        let now = Instant::now();
        let mut timer = running_timer(now);
        timer.remaining_time = 7;

        assert!(!timer.switch_phase(Phase::Pomodoro, &durations(), now + SECOND));
        assert_eq!(timer.remaining_time, 7);
        assert_eq!(timer.last_update, now);
    }

    #[test]
    fn test_switch_to_pomodoro_from_break_refreshes_last_update() {
        let now = Instant::now();
        let mut timer = running_timer(now);
        timer.switch_phase(Phase::ShortBreak, &durations(), now);

        let later = now + Duration::from_millis(700);
        assert!(timer.switch_phase(Phase::Pomodoro, &durations(), later));
        assert_eq!(timer.phase, Phase::Pomodoro);
        assert_eq!(timer.remaining_time, 25);
        assert_eq!(timer.last_update, later);
    }

    #[test]
    fn test_switch_to_pomodoro_while_paused_keeps_last_update() {
        let now = Instant::now();
        let mut timer = TimerState::new(&durations(), None, now);
        timer.switch_phase(Phase::LongBreak, &durations(), now);

        assert!(timer.switch_phase(Phase::Pomodoro, &durations(), now + SECOND));
        assert_eq!(timer.last_update, now);
    }

    #[test]
    fn test_breaks_can_be_entered_from_any_phase() {
        let now = Instant::now();
        let mut timer = TimerState::new(&durations(), None, now);

        assert!(timer.switch_phase(Phase::LongBreak, &durations(), now));
        assert!(timer.switch_phase(Phase::ShortBreak, &durations(), now));
        assert_eq!(timer.phase, Phase::ShortBreak);
        assert_eq!(timer.remaining_time, 5);
    }

    #[test]
    fn test_reset_keeps_background() {
        let now = Instant::now();
        let mut timer = running_timer(now);
        timer.background_image = Some("sky.png".to_string());
        timer.pomodoro_count = 6;
        timer.phase = Phase::ShortBreak;

        timer.reset(&durations(), now);

        let snapshot = timer.snapshot();
        assert_eq!(snapshot.phase, Phase::Pomodoro);
        assert_eq!(snapshot.remaining_time, 25);
        assert_eq!(snapshot.pomodoro_count, 0);
        assert!(!snapshot.running);
        assert_eq!(snapshot.background_image.as_deref(), Some("sky.png"));
    }
}
