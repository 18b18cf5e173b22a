//! Availability status endpoints.

use crate::auth::middleware::{AdminAuth, AppState};
use crate::error::AppError;
use crate::models::{Status, StatusMessage, StatusPayload};
use crate::routes::sanitize_text;
use crate::storage::status;
use axum::{extract::State, Json};

const MAX_MESSAGE_CHARS: usize = 200;

/// GET /api/status — defaults to "Available" before any save.
pub async fn get_status(State(state): State<AppState>) -> Result<Json<Status>, AppError> {
    let status = status::get(&state.store).await?.unwrap_or_default();
    Ok(Json(status))
}

/// PATCH /api/status — merge onto the stored status. The `status` field is
/// required; an omitted message keeps the stored one.
pub async fn update_status(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Status>, AppError> {
    let payload = decode_payload(body)?;

    let Some(availability) = payload.status else {
        return Err(AppError::BadRequest("Status is required".to_string()));
    };

    let current = status::get(&state.store).await?.unwrap_or_default();
    let updated = Status {
        status: availability,
        message: match payload.message {
            Some(message) => Some(sanitize_message(message)),
            None => current.message,
        },
    };

    status::upsert(&state.store, &updated).await?;
    tracing::info!(action = "status_updated", "Status updated");

    Ok(Json(updated))
}

/// Deserialize the payload, turning an unknown availability value into the
/// 400 the frontend expects.
fn decode_payload(body: serde_json::Value) -> Result<StatusPayload, AppError> {
    serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid status value".to_string()))
}

fn sanitize_message(message: StatusMessage) -> StatusMessage {
    StatusMessage {
        ru: message.ru.map(|m| sanitize_text(&m, MAX_MESSAGE_CHARS)),
        en: message.en.map(|m| sanitize_text(&m, MAX_MESSAGE_CHARS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;
    use serde_json::json;

    #[test]
    fn test_decode_rejects_unknown_status() {
        let err = decode_payload(json!({"status": "On vacation"})).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Invalid status value"
        ));
    }

    #[test]
    fn test_decode_accepts_known_status() {
        let payload = decode_payload(json!({"status": "Not taking projects"})).unwrap();
        assert_eq!(payload.status, Some(Availability::NotTakingProjects));
    }
}
