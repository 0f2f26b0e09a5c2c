//! HTTP inspection API.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomKey,
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of live rooms, sorted by key
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let mut summaries = Vec::with_capacity(rooms.len());
    for room in rooms {
        summaries.push(RoomSummaryDto::from_room(&room).await);
    }

    Json(summaries)
}

/// Get room detail by key
///
/// 不正なキーは 400、存在しない Room は 404 を返します。
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let key = match RoomKey::new(key) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("Rejecting room lookup: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    match state.get_room_detail_usecase.execute(&key).await {
        Ok(room) => Ok(Json(RoomDetailDto::from_room(&room).await)),
        Err(GetRoomDetailError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}
