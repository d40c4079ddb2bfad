//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    services::AssetError,
    state::{AppState, Phase},
};
use super::responses::{AckResponse, ApiError, HealthResponse, StatusResponse, UploadResponse};

/// Multipart field carrying the uploaded image
pub const UPLOAD_FIELD: &str = "background";

/// Handle GET /status - Return the current timer snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(state.snapshot().into())
}

/// Handle GET /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.start();
    Json(AckResponse::ok())
}

/// Handle GET /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.pause();
    Json(AckResponse::ok())
}

/// Handle GET /reset - Return to a fresh, paused pomodoro
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.reset();
    Json(AckResponse::ok())
}

/// Handle POST /switch_to_short_break
pub async fn short_break_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.switch_phase(Phase::ShortBreak);
    Json(AckResponse::ok())
}

/// Handle POST /switch_to_long_break
pub async fn long_break_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.switch_phase(Phase::LongBreak);
    Json(AckResponse::ok())
}

/// Handle POST /switch_to_pomodoro - Only takes effect during a break
pub async fn pomodoro_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.switch_phase(Phase::Pomodoro);
    Json(AckResponse::ok())
}

/// Handle POST /upload - Store a new background image and make it active
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Upload is not a multipart form: {}", e);
        ApiError::from(AssetError::InvalidFile)
    })?;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(rejected_upload)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await.map_err(rejected_upload)?;
        upload = Some((original_name, contents));
        break;
    }

    let Some((original_name, contents)) = upload else {
        warn!("Upload request without a '{}' field", UPLOAD_FIELD);
        return Err(AssetError::InvalidFile.into());
    };

    let filename = state.assets.store(&original_name, &contents).await?;
    state.set_background_image(filename.clone());

    Ok(Json(UploadResponse::new(filename)))
}

/// Map a failure while reading the multipart body to a client error
fn rejected_upload(e: MultipartError) -> ApiError {
    warn!("Failed to read upload: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AssetError::TooLarge.into()
    } else {
        AssetError::InvalidFile.into()
    }
}

/// Handle POST /remove_background - Delete the active background image
pub async fn remove_background_handler(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    if let Some(filename) = state.clear_background_image() {
        info!("Background image {} cleared", filename);
        if let Err(e) = state.assets.remove(&filename).await {
            warn!("Failed to delete background image: {:#}", anyhow::Error::new(e));
        }
    }
    Json(AckResponse::ok())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
