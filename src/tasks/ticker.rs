//! Timer tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::{AppState, TickOutcome};

/// How often the tick task wakes to check for an elapsed second
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Background task that advances the timer once per elapsed second.
///
/// Exits as soon as the timer is paused or a newer generation has been
/// started, so at most one task ever advances the shared state.
pub async fn ticker_task(state: Arc<AppState>, generation: u64) {
    debug!("Starting ticker generation {}", generation);

    let mut interval = interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.advance(generation) {
            None => break,
            Some(TickOutcome::Idle) => {}
            Some(TickOutcome::Decremented { remaining_time }) => {
                debug!("Tick: {}s remaining", remaining_time);
            }
            Some(TickOutcome::PhaseCompleted { from, to, pomodoro_count }) => {
                info!("{} finished, entering {} (pomodoros completed: {})", from, to, pomodoro_count);
            }
        }
    }

    debug!("Ticker generation {} stopped", generation);
}
