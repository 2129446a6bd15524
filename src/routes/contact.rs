use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson},
};
use serde_json::json;

use crate::db::models::InsertContactSubmission;
use crate::AppState;

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.trim().is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

pub async fn create_contact_submission(
    State(state): State<AppState>,
    Json(req): Json<InsertContactSubmission>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() || req.subject.trim().is_empty() || req.message.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            AxumJson(json!({ "message": "Name, subject and message are required" })),
        )
            .into_response();
    }
    if !is_valid_email(&req.email) {
        return (
            StatusCode::BAD_REQUEST,
            AxumJson(json!({ "message": "A valid email address is required" })),
        )
            .into_response();
    }

    match state.storage.create_contact_submission(req).await {
        Ok(submission) => (StatusCode::CREATED, AxumJson(submission)).into_response(),
        Err(e) => {
            tracing::error!("DB Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}

pub async fn list_contact_submissions(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.get_contact_submissions().await {
        Ok(submissions) => AxumJson(submissions).into_response(),
        Err(e) => {
            tracing::error!("DB Query Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}
