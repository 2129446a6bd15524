use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson},
};
use serde_json::json;

use crate::db::models::InsertEvent;
use crate::AppState;

pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.get_events().await {
        Ok(events) => AxumJson(events).into_response(),
        Err(e) => {
            tracing::error!("DB Query Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}

pub async fn get_event(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.storage.get_event(id).await {
        Ok(Some(event)) => AxumJson(event).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(e) => {
            tracing::error!("DB Query Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<InsertEvent>,
) -> impl IntoResponse {
    if req.title.trim().is_empty()
        || req.description.trim().is_empty()
        || req.date.trim().is_empty()
        || req.location.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            AxumJson(json!({ "message": "All event fields are required" })),
        )
            .into_response();
    }

    match state.storage.create_event(req).await {
        Ok(event) => (StatusCode::CREATED, AxumJson(event)).into_response(),
        Err(e) => {
            tracing::error!("DB Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}
