//! Admin auth endpoints: login, logout, and a token healthcheck.

use crate::auth::middleware::{AdminAuth, AppState, STRICT_WINDOW};
use crate::auth::token::{issue_token, AUTH_COOKIE, TOKEN_TTL_SECS};
use crate::error::AppError;
use crate::models::LoginRequest;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use std::net::SocketAddr;

/// Build the auth cookie with the flags the frontend relies on.
fn auth_cookie(token: String, production: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(production)
        .path("/")
        .max_age(time::Duration::seconds(TOKEN_TTL_SECS))
        .build()
}

/// Removal cookie with flags matching `auth_cookie`.
fn clear_auth_cookie(production: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(production)
        .path("/")
        .build()
}

/// POST /api/admin/login — verify admin credentials and set the auth cookie.
///
/// Unknown email and wrong password return byte-identical 401 bodies so the
/// response doesn't reveal which factor failed.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<serde_json::Value>), AppError> {
    if !state.limiter.check(
        "login",
        addr.ip(),
        state.config.rate_limit_login_per_15min,
        STRICT_WINDOW,
    ) {
        tracing::warn!(action = "rate_limited", endpoint = "admin/login", "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    // Malformed bodies get the same JSON error shape as every other failure
    let Json(req) = payload.map_err(|_| AppError::BadRequest("Invalid JSON body".to_string()))?;

    let (Some(admin_email), Some(password_hash)) = (
        state.config.admin_email.as_ref(),
        state.config.admin_password_hash.as_ref(),
    ) else {
        return Err(AppError::NotConfigured(
            "Admin credentials not configured".to_string(),
        ));
    };

    let (email, password) = match (req.email, req.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }
    };

    if email != *admin_email {
        tracing::warn!(action = "login_failed", "Invalid credentials");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // bcrypt is deliberately slow; keep it off the async worker threads
    let hash = password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !is_valid {
        tracing::warn!(action = "login_failed", "Invalid credentials");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(&email, &state.config.jwt_secret)?;
    let jar = jar.add(auth_cookie(token, state.config.production));

    tracing::info!(action = "login_success", email = %email, "Admin logged in");

    Ok((jar, Json(json!({ "status": "ok" }))))
}

/// POST /api/admin/logout — clear the auth cookie.
///
/// No server-side invalidation: an issued token stays cryptographically
/// valid until its natural expiry; logout only removes the client's copy.
pub async fn logout(
    AdminAuth(identity): AdminAuth,
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(clear_auth_cookie(state.config.production));

    tracing::info!(action = "logout", email = %identity.email, "Admin logged out");

    (jar, Json(json!({ "status": "ok" })))
}

/// GET /api/admin/ping — cheap healthcheck for the admin token, no side
/// effects.
pub async fn ping(AdminAuth(_identity): AdminAuth) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
