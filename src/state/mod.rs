//! State management module
//!
//! This module contains the timer state machine and the shared application
//! state that guards it.

pub mod phase;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use phase::{Phase, PhaseDurations};
pub use app_state::AppState;
pub use timer_state::{TickOutcome, TimerSnapshot, TimerState};
