use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compute_controls;
use crate::io::json::{parse_request, ControlResponse, DEFAULT_AGENT_ID};
use super::error::{ApiError, ApiResult};
use super::state::AppState;

// POST /get_controls
pub async fn get_controls(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ControlResponse>> {
    let request = parse_request(&body)?;
    let agent_id = request.agent_id().to_string();

    let slot = state
        .registry
        .slot(&agent_id)
        .ok_or(ApiError::CapacityExhausted { limit: state.registry.max_agents() })?;

    // Held only for the synchronous tick; nothing awaits under the lock.
    let result = compute_controls(&mut slot.lock(), &request);
    let response =
        result.map_err(|source| ApiError::Computation { agent_id: agent_id.clone(), source })?;

    debug!(
        agent_id = %agent_id,
        status = ?response.drone_status,
        yaw = response.controls.yaw,
        throttle = response.controls.throttle,
        pitch = response.controls.pitch,
        "tick"
    );

    Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    #[serde(default)]
    pub agent_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub agent_id: String,
    pub reset: bool,
}

// POST /reset
pub async fn reset(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<ResetResponse>> {
    let request: ResetRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ResetRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| ApiError::Malformed)?
    };
    let agent_id = request.agent_id.unwrap_or_else(|| DEFAULT_AGENT_ID.to_string());
    let reset = state.registry.reset(&agent_id);
    info!(agent_id = %agent_id, reset, "reset agent state");
    Ok(Json(ResetResponse { agent_id, reset }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub agents: usize,
}

// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", agents: state.registry.len() })
}
