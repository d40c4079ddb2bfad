//! External collaborator module
//!
//! This module contains the storage backend for uploaded background images.

pub mod assets;

// Re-export main types
pub use assets::*;
