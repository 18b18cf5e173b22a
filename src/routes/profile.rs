//! Profile endpoints. One record per deployment.

use crate::auth::middleware::{AdminAuth, AppState};
use crate::error::AppError;
use crate::models::{LocalizedString, Profile, ProfilePayload, Socials};
use crate::routes::sanitize_text;
use crate::storage::profile;
use axum::{extract::State, Json};

const MAX_NAME_CHARS: usize = 100;
const MAX_ROLE_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_PHOTO_URL_CHARS: usize = 2048;
const MAX_SOCIAL_URL_CHARS: usize = 200;
const MAX_TELEGRAM_CHARS: usize = 100;

/// GET /api/profile — the stored profile, or an empty one before any save.
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    let profile = profile::get(&state.store).await?.unwrap_or_default();
    Ok(Json(profile))
}

/// PATCH /api/profile — merge a partial update into the stored profile.
pub async fn update_profile(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Profile>, AppError> {
    let mut current = profile::get(&state.store).await?.unwrap_or_default();

    if let Some(name) = payload.name {
        let name = sanitize_text(&name, MAX_NAME_CHARS);
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        current.name = name;
    }
    if let Some(role) = payload.role {
        current.role = sanitize_pair(role, MAX_ROLE_CHARS);
    }
    if let Some(description) = payload.description {
        current.description = sanitize_pair(description, MAX_DESCRIPTION_CHARS);
    }
    if let Some(photo_url) = payload.photo_url {
        current.photo_url = Some(sanitize_text(&photo_url, MAX_PHOTO_URL_CHARS));
    }
    if let Some(about_texts) = payload.about_texts {
        current.about_texts = about_texts;
    }
    if let Some(socials) = payload.socials {
        current.socials = Some(sanitize_socials(socials));
    }

    profile::upsert(&state.store, &current).await?;
    tracing::info!(action = "profile_updated", "Profile updated");

    Ok(Json(current))
}

fn sanitize_pair(pair: LocalizedString, max_chars: usize) -> LocalizedString {
    LocalizedString {
        ru: sanitize_text(&pair.ru, max_chars),
        en: sanitize_text(&pair.en, max_chars),
    }
}

fn sanitize_socials(socials: Socials) -> Socials {
    Socials {
        github: socials.github.map(|v| sanitize_text(&v, MAX_SOCIAL_URL_CHARS)),
        linkedin: socials.linkedin.map(|v| sanitize_text(&v, MAX_SOCIAL_URL_CHARS)),
        telegram: socials.telegram.map(|v| sanitize_text(&v, MAX_TELEGRAM_CHARS)),
    }
}
