//! REST API endpoints for the furnace service.
//!
//! - `GET /current_temperature` - Current furnace temperature
//! - `GET /api/health` - Service health check
//! - `GET /api/setpoint` - Current setpoint and heater state
//! - `POST /api/setpoint` - Change the setpoint and re-evaluate the heater
//!
//! All endpoints return structured JSON errors via [`AppError`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use furnace_core::TemperatureResponse;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::controller::evaluate;
use crate::state::{AppState, ControlState};

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/current_temperature", get(current_temperature))
        .route("/api/health", get(health))
        .route("/api/setpoint", get(get_setpoint).post(set_setpoint))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub source: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.name().to_string(),
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// Current temperature from the configured source.
///
/// Returns 503 when the source fails or has no data.
async fn current_temperature(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemperatureResponse>, AppError> {
    match state.source.read_temperature().await {
        Ok(Some(temperature)) => Ok(Json(TemperatureResponse { temperature })),
        Ok(None) => Err(AppError::Unavailable("no temperature data".to_string())),
        Err(e) => Err(AppError::Unavailable(e.to_string())),
    }
}

async fn get_setpoint(State(state): State<Arc<AppState>>) -> Json<ControlState> {
    Json(state.control.read().await.clone())
}

/// Setpoint update request.
#[derive(Debug, Deserialize)]
pub struct SetpointRequest {
    pub setpoint: f64,
}

async fn set_setpoint(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetpointRequest>,
) -> Result<Json<ControlState>, AppError> {
    if !request.setpoint.is_finite() {
        return Err(AppError::BadRequest(
            "setpoint must be a finite number".to_string(),
        ));
    }

    {
        let mut control = state.control.write().await;
        info!(
            "Setpoint changed from {:.2} to {:.2} °C",
            control.setpoint, request.setpoint
        );
        control.setpoint = request.setpoint;
    }

    Ok(Json(evaluate(&state).await))
}

/// API error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
