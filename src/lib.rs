//! Pomodoro Server - A single-user Pomodoro timer served over HTTP
//!
//! This library provides the shared timer state machine, its background
//! ticking task, background-image storage and the HTTP API around them.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Phase, PhaseDurations, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
