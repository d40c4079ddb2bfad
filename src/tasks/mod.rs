//! Background tasks module
//!
//! This module contains the task that advances the timer while it runs.

pub mod ticker;

// Re-export main functions
pub use ticker::{ticker_task, TICK_INTERVAL};
