//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info, warn};

use crate::{
    events::{self, UiEvent},
    state::AppState,
};
use super::responses::{EventResponse, HealthResponse, StatusResponse};

/// Handle POST /events - UI event webhook from the hosting layer.
///
/// The event source is not under this service's control, so anything that
/// fails to decode is answered with `status: "ignored"` rather than an
/// error status.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<UiEvent>>,
) -> Result<Json<EventResponse>, StatusCode> {
    let Some(Json(event)) = payload else {
        warn!("Discarding undecodable event payload");
        return Ok(Json(EventResponse::ignored(state.snapshot())));
    };

    match events::decode(&event, &state.timer_config) {
        Some(command) => {
            let label = command.label();
            info!("Accepted UI event: {}", label);
            match state.dispatch(command).await {
                Ok(()) => Ok(Json(EventResponse::accepted(label, state.snapshot()))),
                Err(e) => {
                    error!("Failed to dispatch command: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        None => {
            debug!("Ignoring event for another panel or unknown widget");
            Ok(Json(EventResponse::ignored(state.snapshot())))
        }
    }
}

/// Handle GET /status - Return the current timer snapshot and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_event, last_event_time) = state.last_event();

    Json(StatusResponse {
        timer: state.snapshot(),
        panel_id: state.timer_config.panel_id.clone(),
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_event,
        last_event_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
