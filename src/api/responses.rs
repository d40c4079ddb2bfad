//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{services::AssetError, state::TimerSnapshot};

/// Timer status as polled by the browser client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub remaining_time: i64,
    pub is_running: bool,
    pub current_mode: String,
    pub pomodoro_count: u32,
    pub background_image: Option<String>,
    /// Reserved for client-side sound cues, never set by the server
    pub should_play_sound: bool,
}

impl From<TimerSnapshot> for StatusResponse {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            remaining_time: snapshot.remaining_time,
            is_running: snapshot.running,
            current_mode: snapshot.phase.as_str().to_string(),
            pomodoro_count: snapshot.pomodoro_count,
            background_image: snapshot.background_image,
            should_play_sound: false,
        }
    }
}

/// Fixed acknowledgement returned by command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

/// Response for a successful background upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
}

impl UploadResponse {
    pub fn new(filename: String) -> Self {
        Self { success: true, filename }
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}

/// Error returned from handlers, rendered as `{ "error": ... }`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<AssetError> for ApiError {
    fn from(e: AssetError) -> Self {
        match e {
            AssetError::InvalidFile => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            AssetError::TooLarge => Self::new(StatusCode::PAYLOAD_TOO_LARGE, e.to_string()),
            _ => {
                error!("Background storage failed: {:#}", anyhow::Error::new(e));
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store background image")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}
