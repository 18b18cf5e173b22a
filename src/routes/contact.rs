//! Contact form endpoint. No mailer in this deployment; accepted messages
//! are written to the log for the operator to pick up.

use crate::auth::middleware::{AppState, STRICT_WINDOW};
use crate::error::AppError;
use crate::models::ContactRequest;
use crate::routes::sanitize_text;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 200;
const MIN_MESSAGE_CHARS: usize = 10;
const MAX_MESSAGE_CHARS: usize = 2000;

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.limiter.check(
        "contact",
        addr.ip(),
        state.config.rate_limit_contact_per_15min,
        STRICT_WINDOW,
    ) {
        tracing::warn!(action = "rate_limited", endpoint = "contact", "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    let Json(req) = payload.map_err(|_| AppError::BadRequest("Invalid JSON body".to_string()))?;

    let name = match req.name.as_deref().map(|n| sanitize_text(n, MAX_NAME_CHARS)) {
        Some(n) if !n.is_empty() => n,
        _ => return Err(AppError::BadRequest("Name is required".to_string())),
    };
    let email = match req.email.as_deref().map(|e| sanitize_text(e, MAX_EMAIL_CHARS)) {
        Some(e) if !e.is_empty() => e,
        _ => return Err(AppError::BadRequest("Email is required".to_string())),
    };
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    let message = match req
        .message
        .as_deref()
        .map(|m| sanitize_text(m, MAX_MESSAGE_CHARS))
    {
        Some(m) if m.chars().count() >= MIN_MESSAGE_CHARS => m,
        _ => {
            return Err(AppError::BadRequest(
                "Message must be at least 10 characters".to_string(),
            ));
        }
    };

    tracing::info!(
        action = "contact_received",
        name = %name,
        email = %email,
        message_len = message.chars().count(),
        "Contact message received"
    );

    Ok(Json(json!({ "status": "ok" })))
}

/// Shape check, not RFC parsing: one `@`, a non-empty local part, a domain
/// with a dot, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.len() >= 3
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example.com."));
        assert!(!is_valid_email("us er@example.com"));
    }
}
