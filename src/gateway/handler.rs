use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::GatewayError;
use super::state::AppState;
use crate::pipeline::MatchRequest;
use crate::profile::Role;

#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub ok: bool,
    pub queued: bool,
}

/// `/v1/match/speakers`: called by organizers looking for speakers.
#[instrument(skip(state, body))]
pub async fn match_speakers_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, GatewayError> {
    run_match(&state, &method, &body, Role::Organizer).await
}

/// `/v1/match/organizers`: called by speakers looking for events.
#[instrument(skip(state, body))]
pub async fn match_organizers_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, GatewayError> {
    run_match(&state, &method, &body, Role::Speaker).await
}

async fn run_match(
    state: &AppState,
    method: &Method,
    body: &[u8],
    default_role: Role,
) -> Result<Response, GatewayError> {
    if let Some(early) = preflight(method)? {
        return Ok(early);
    }

    let value = parse_body(body)?;
    let request = MatchRequest::from_json(&value, default_role)?;
    let response = state.pipeline.run(&request).await?;

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Queues a background embedding refresh for `{profile_id, role}`.
#[instrument(skip(state, body))]
pub async fn refresh_embedding_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, GatewayError> {
    if let Some(early) = preflight(&method)? {
        return Ok(early);
    }

    let value = parse_body(&body)?;
    let profile_id = value
        .get("profile_id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let role = value.get("role").and_then(Value::as_str);
    let (Some(profile_id), Some(role)) = (profile_id, role) else {
        return Err(GatewayError::InvalidRequest(
            "Body must include: profile_id, role".to_string(),
        ));
    };
    let role = role
        .parse::<Role>()
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

    state
        .refresher
        .spawn_embedding_refresh(role, profile_id.to_string());
    debug!(%role, profile_id, "Embedding refresh queued");

    Ok((
        StatusCode::ACCEPTED,
        Json(QueuedResponse {
            ok: true,
            queued: true,
        }),
    )
        .into_response())
}

/// `OPTIONS` short-circuits with 204; anything but `POST` is rejected.
fn preflight(method: &Method) -> Result<Option<Response>, GatewayError> {
    if method == Method::OPTIONS {
        return Ok(Some(StatusCode::NO_CONTENT.into_response()));
    }
    if method != Method::POST {
        return Err(GatewayError::MethodNotAllowed(method.to_string()));
    }
    Ok(None)
}

fn parse_body(body: &[u8]) -> Result<Value, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidJson(e.to_string()))
}
