use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use wardcall_core::{
    CandidateBatch, IceCandidate, IceServerConfig, RoomId, RoomSnapshot, SessionDescription,
};

use crate::http::{ApiError, AppState};

pub async fn get_room(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomSnapshot>, ApiError> {
    Ok(Json(state.store.snapshot(&room_id)?))
}

/// Teardown from either party. 204 whether or not the room still exists.
pub async fn delete_room(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.store.remove(&room_id);
    StatusCode::NO_CONTENT
}

pub async fn post_offer(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
    Json(description): Json<SessionDescription>,
) -> Result<StatusCode, ApiError> {
    state.store.put_offer(&room_id, description)?;
    Ok(StatusCode::CREATED)
}

pub async fn get_offer(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
) -> Json<Option<SessionDescription>> {
    Json(state.store.offer(&room_id))
}

pub async fn post_answer(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
    Json(description): Json<SessionDescription>,
) -> Result<StatusCode, ApiError> {
    state.store.put_answer(&room_id, description)?;
    Ok(StatusCode::CREATED)
}

pub async fn get_answer(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
) -> Json<Option<SessionDescription>> {
    Json(state.store.answer(&room_id))
}

pub async fn post_candidate(
    Path(room_id): Path<RoomId>,
    State(state): State<Arc<AppState>>,
    Json(candidate): Json<IceCandidate>,
) -> Result<StatusCode, ApiError> {
    debug!("candidate appended to room {}", room_id);
    state.store.push_candidate(&room_id, candidate)?;
    Ok(StatusCode::ACCEPTED)
}

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    /// Index of the first candidate the consumer has not applied yet.
    #[serde(default)]
    pub since: usize,
}

pub async fn get_candidates(
    Path(room_id): Path<RoomId>,
    Query(query): Query<CandidateQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<CandidateBatch> {
    Json(state.store.candidates_since(&room_id, query.since))
}

pub async fn get_ice_config(State(state): State<Arc<AppState>>) -> Json<Vec<IceServerConfig>> {
    Json(state.ice_servers.clone())
}
