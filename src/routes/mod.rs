//! API route handlers.

pub mod admin;
pub mod contact;
pub mod profile;
pub mod projects;
pub mod skills;
pub mod status;

use crate::auth::middleware::AppState;
use crate::error::AppError;
use axum::{
    routing::{get, patch, post},
    Router,
};

/// Trim a string and cap its length in characters.
pub(crate) fn sanitize_text(s: &str, max_chars: usize) -> String {
    s.trim().chars().take(max_chars).collect()
}

/// Build the API router with all endpoints.
///
/// Mutating handlers take the `AdminAuth` extractor, so the gate is wired
/// per route rather than per method.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Project endpoints
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        // Skill endpoints
        .route(
            "/api/skills",
            get(skills::list_skills).post(skills::create_skill),
        )
        .route(
            "/api/skills/{id}",
            patch(skills::update_skill).delete(skills::delete_skill),
        )
        // Profile and status
        .route(
            "/api/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route(
            "/api/status",
            get(status::get_status).patch(status::update_status),
        )
        // Contact form
        .route("/api/contact", post(contact::submit_contact))
        // Admin auth endpoints
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/ping", get(admin::ping))
        .fallback(route_not_found)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_trims_and_caps() {
        assert_eq!(sanitize_text("  hello  ", 100), "hello");
        assert_eq!(sanitize_text("abcdef", 3), "abc");
        // Char-based, so multibyte input can't be split mid-character
        assert_eq!(sanitize_text("прив", 3), "при");
    }
}
