//! Project CRUD endpoints. Reads are public, mutations go through `AdminAuth`.

use crate::auth::middleware::{AdminAuth, AppState};
use crate::error::AppError;
use crate::models::{Localized, LocalizedString, Project, ProjectPayload};
use crate::routes::sanitize_text;
use crate::storage::projects;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 2000;
const MAX_TECH_ITEMS: usize = 20;
const MAX_TECH_CHARS: usize = 50;
const MAX_STATUS_CHARS: usize = 50;
const MAX_URL_CHARS: usize = 2048;
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// GET /api/projects — all projects, newest first.
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = projects::list(&state.store).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = projects::get(&state.store, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// POST /api/projects — create a project, responds 201 with the stored record.
pub async fn create_project(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let payload = decode_payload(body)?;

    let title = match payload.title.map(sanitize_localized_title) {
        Some(t) if !localized_is_empty(&t) => t,
        _ => return Err(AppError::BadRequest("Title is required".to_string())),
    };
    let description = match payload.description.map(sanitize_localized_description) {
        Some(d) if !localized_is_empty(&d) => d,
        _ => return Err(AppError::BadRequest("Description is required".to_string())),
    };
    let year = match payload.year {
        Some(y) if (MIN_YEAR..=MAX_YEAR).contains(&y) => y,
        _ => {
            return Err(AppError::BadRequest(
                "Year must be a valid number between 1900 and 2100".to_string(),
            ));
        }
    };
    let Some(tech_stack) = payload.tech_stack else {
        return Err(AppError::BadRequest(
            "Tech stack must be an array".to_string(),
        ));
    };
    let status = match payload.status.as_deref().map(|s| sanitize_text(s, MAX_STATUS_CHARS)) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AppError::BadRequest("Status is required".to_string())),
    };

    let project = Project {
        id: Uuid::new_v4().to_string(),
        title,
        description,
        tech_stack: sanitize_tech_stack(tech_stack),
        year,
        status,
        url: payload.url.map(|u| sanitize_text(&u, MAX_URL_CHARS)),
        images: payload.images,
    };

    let created = projects::create(&state.store, project).await?;
    tracing::info!(action = "project_created", id = %created.id, "Project created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/projects/{id} — merge a partial update.
pub async fn update_project(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Project>, AppError> {
    let payload = decode_payload(body)?;
    let payload = validate_partial(payload)?;

    let updated = projects::update(&state.store, &id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    tracing::info!(action = "project_updated", id = %updated.id, "Project updated");
    Ok(Json(updated))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !projects::delete(&state.store, &id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    tracing::info!(action = "project_deleted", id = %id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Type-check the raw body before deserializing, so the wrong shape comes
/// back as a 400 with a field-specific message instead of a generic
/// deserialization rejection.
fn decode_payload(body: serde_json::Value) -> Result<ProjectPayload, AppError> {
    if let Some(tech_stack) = body.get("techStack") {
        if !tech_stack.is_null() && !tech_stack.is_array() {
            return Err(AppError::BadRequest(
                "Tech stack must be an array".to_string(),
            ));
        }
    }
    if let Some(year) = body.get("year") {
        if !year.is_null() && year.as_i64().is_none() {
            return Err(AppError::BadRequest(
                "Year must be a valid number between 1900 and 2100".to_string(),
            ));
        }
    }

    serde_json::from_value(body).map_err(|_| AppError::BadRequest("Invalid project data".to_string()))
}

/// Validate and sanitize the fields a PATCH actually provides. A provided
/// field must still pass the same checks as on create.
fn validate_partial(payload: ProjectPayload) -> Result<ProjectPayload, AppError> {
    let title = match payload.title.map(sanitize_localized_title) {
        Some(t) if localized_is_empty(&t) => {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        other => other,
    };
    let description = match payload.description.map(sanitize_localized_description) {
        Some(d) if localized_is_empty(&d) => {
            return Err(AppError::BadRequest("Description is required".to_string()));
        }
        other => other,
    };
    if let Some(year) = payload.year {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::BadRequest(
                "Year must be a valid number between 1900 and 2100".to_string(),
            ));
        }
    }
    let status = match payload
        .status
        .as_deref()
        .map(|s| sanitize_text(s, MAX_STATUS_CHARS))
    {
        Some(s) if s.is_empty() => {
            return Err(AppError::BadRequest("Status is required".to_string()));
        }
        other => other,
    };

    Ok(ProjectPayload {
        title,
        description,
        tech_stack: payload.tech_stack.map(sanitize_tech_stack),
        year: payload.year,
        status,
        url: payload.url.map(|u| sanitize_text(&u, MAX_URL_CHARS)),
        images: payload.images,
    })
}

fn sanitize_localized_title(title: Localized) -> Localized {
    sanitize_localized(title, MAX_TITLE_CHARS)
}

fn sanitize_localized_description(description: Localized) -> Localized {
    sanitize_localized(description, MAX_DESCRIPTION_CHARS)
}

fn sanitize_localized(value: Localized, max_chars: usize) -> Localized {
    match value {
        Localized::Text(s) => Localized::Text(sanitize_text(&s, max_chars)),
        Localized::Pair(p) => Localized::Pair(LocalizedString {
            ru: sanitize_text(&p.ru, max_chars),
            en: sanitize_text(&p.en, max_chars),
        }),
    }
}

fn localized_is_empty(value: &Localized) -> bool {
    match value {
        Localized::Text(s) => s.is_empty(),
        Localized::Pair(p) => p.ru.is_empty() && p.en.is_empty(),
    }
}

fn sanitize_tech_stack(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .take(MAX_TECH_ITEMS)
        .map(|item| sanitize_text(&item, MAX_TECH_CHARS))
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rejects_non_array_tech_stack() {
        let err = decode_payload(json!({"techStack": "Rust, Axum"})).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Tech stack must be an array"
        ));
    }

    #[test]
    fn test_decode_rejects_non_numeric_year() {
        let err = decode_payload(json!({"year": "twenty-twenty"})).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg.starts_with("Year must be")
        ));
    }

    #[test]
    fn test_decode_accepts_localized_pair_title() {
        let payload = decode_payload(json!({
            "title": {"ru": "Проект", "en": "Project"},
            "year": 2024
        }))
        .unwrap();
        assert!(matches!(payload.title, Some(Localized::Pair(_))));
        assert_eq!(payload.year, Some(2024));
    }

    #[test]
    fn test_partial_rejects_blank_title() {
        let payload = decode_payload(json!({"title": "   "})).unwrap();
        let err = validate_partial(payload).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Title is required"
        ));
    }

    #[test]
    fn test_partial_rejects_out_of_range_year() {
        let payload = decode_payload(json!({"year": 1565})).unwrap();
        assert!(validate_partial(payload).is_err());
    }

    #[test]
    fn test_partial_passes_untouched_fields_through() {
        let payload = decode_payload(json!({"status": "In progress"})).unwrap();
        let validated = validate_partial(payload).unwrap();
        assert_eq!(validated.status.as_deref(), Some("In progress"));
        assert!(validated.title.is_none());
        assert!(validated.year.is_none());
    }

    #[test]
    fn test_tech_stack_sanitization() {
        let items = vec![
            "  Rust  ".to_string(),
            String::new(),
            "x".repeat(MAX_TECH_CHARS + 10),
        ];
        let cleaned = sanitize_tech_stack(items);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0], "Rust");
        assert_eq!(cleaned[1].chars().count(), MAX_TECH_CHARS);
    }
}
