//! Main application state management

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant as StdInstant,
};
use tokio::time::Instant;
use tracing::{debug, info};

use super::{Phase, PhaseDurations, TickOutcome, TimerSnapshot, TimerState};
use crate::{config::Config, services::AssetStore, tasks::ticker_task};

/// Application state shared by every request handler and the tick task
#[derive(Debug)]
pub struct AppState {
    /// The single timer instance; every read and write goes through this lock
    timer: Mutex<TimerState>,
    pub durations: PhaseDurations,
    /// Storage for uploaded background images
    pub assets: AssetStore,
    /// Directory served at `/` and `/static`
    pub static_dir: PathBuf,
    pub start_time: StdInstant,
}

impl AppState {
    /// Create a new AppState with a paused pomodoro
    pub fn new(
        durations: PhaseDurations,
        assets: AssetStore,
        static_dir: PathBuf,
        default_background: Option<String>,
    ) -> Self {
        Self {
            timer: Mutex::new(TimerState::new(&durations, default_background, Instant::now())),
            durations,
            assets,
            static_dir,
            start_time: StdInstant::now(),
        }
    }

    /// Create the AppState described by the command line
    pub fn from_config(config: &Config) -> Self {
        let default_background = Some(config.default_background.clone())
            .filter(|name| !name.is_empty());

        Self::new(
            config.durations(),
            AssetStore::new(&config.upload_dir),
            config.static_dir.clone(),
            default_background,
        )
    }

    fn timer(&self) -> MutexGuard<'_, TimerState> {
        // The timer is plain data, so a panic elsewhere cannot leave it half-updated
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of the current timer state
    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer().snapshot()
    }

    /// Start counting down. Spawns a fresh tick task unless already running.
    pub fn start(self: &Arc<Self>) {
        let generation = {
            let mut timer = self.timer();
            if timer.running {
                debug!("Start requested while already running");
                return;
            }
            timer.running = true;
            timer.last_update = Instant::now();
            timer.ticker_generation += 1;
            timer.ticker_generation
        };

        info!("Timer started (ticker generation {})", generation);
        tokio::spawn(ticker_task(Arc::clone(self), generation));
    }

    /// Stop counting down. The tick task notices and exits on its next wake.
    pub fn pause(&self) {
        let mut timer = self.timer();
        if timer.running {
            info!("Timer paused with {}s left in {}", timer.remaining_time, timer.phase);
        }
        timer.running = false;
    }

    /// Return to a fresh, paused pomodoro
    pub fn reset(&self) {
        self.timer().reset(&self.durations, Instant::now());
        info!("Timer reset");
    }

    /// Force a phase change, see `TimerState::switch_phase`
    pub fn switch_phase(&self, target: Phase) -> bool {
        let switched = self.timer().switch_phase(target, &self.durations, Instant::now());
        if switched {
            info!("Switched to {}", target);
        } else {
            debug!("Switch to {} ignored, already in a pomodoro", target);
        }
        switched
    }

    pub fn set_background_image(&self, filename: String) {
        info!("Background image set to {}", filename);
        self.timer().background_image = Some(filename);
    }

    /// Clear the background image, returning the one that was active
    pub fn clear_background_image(&self) -> Option<String> {
        self.timer().background_image.take()
    }

    /// Advance the timer on behalf of the tick task of `generation`.
    /// Returns `None` once that task should exit.
    pub fn advance(&self, generation: u64) -> Option<TickOutcome> {
        let mut timer = self.timer();
        if !timer.running || timer.ticker_generation != generation {
            return None;
        }
        Some(timer.tick(&self.durations, Instant::now()))
    }

    /// Upload directory of the background image store
    pub fn upload_dir(&self) -> &Path {
        self.assets.upload_dir()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
