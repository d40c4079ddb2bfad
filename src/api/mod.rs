//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{services::MAX_UPLOAD_BYTES, state::AppState};
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/status", get(status_handler))
        .route("/start", get(start_handler))
        .route("/pause", get(pause_handler))
        .route("/reset", get(reset_handler))
        .route("/switch_to_short_break", post(short_break_handler))
        .route("/switch_to_long_break", post(long_break_handler))
        .route("/switch_to_pomodoro", post(pomodoro_handler))
        .route(
            "/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/remove_background", post(remove_background_handler))
        .route("/health", get(health_handler))
        .route_service("/", index)
        .nest_service("/static", static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
