use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson},
};
use serde_json::json;

use crate::db::models::InsertDonation;
use crate::AppState;

// Blank donor fields from the form become proper absences, never
// empty-string sentinels in storage.
fn normalize_optional(input: Option<String>) -> Option<String> {
    input
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn create_donation(
    State(state): State<AppState>,
    Json(req): Json<InsertDonation>,
) -> impl IntoResponse {
    if !req.amount.is_finite() || req.amount <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            AxumJson(json!({ "message": "Donation amount must be a positive number" })),
        )
            .into_response();
    }

    let donation = InsertDonation {
        amount: req.amount,
        donor_name: normalize_optional(req.donor_name),
        donor_email: normalize_optional(req.donor_email),
        is_recurring: req.is_recurring,
    };

    match state.storage.create_donation(donation).await {
        Ok(donation) => (StatusCode::CREATED, AxumJson(donation)).into_response(),
        Err(e) => {
            tracing::error!("DB Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}

pub async fn list_donations(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.get_donations().await {
        Ok(donations) => AxumJson(donations).into_response(),
        Err(e) => {
            tracing::error!("DB Query Error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_optional;

    #[test]
    fn blank_and_whitespace_become_none() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some(String::new())), None);
        assert_eq!(normalize_optional(Some("   ".to_string())), None);
        assert_eq!(
            normalize_optional(Some("  Carol ".to_string())),
            Some("Carol".to_string())
        );
    }
}
