//! Skill CRUD endpoints.

use crate::auth::middleware::{AdminAuth, AppState};
use crate::error::AppError;
use crate::models::{Skill, SkillCategory, SkillLevel, SkillPayload};
use crate::routes::sanitize_text;
use crate::storage::skills;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

const MAX_NAME_CHARS: usize = 100;

/// GET /api/skills
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>, AppError> {
    let skills = skills::list(&state.store).await?;
    Ok(Json(skills))
}

/// POST /api/skills — create a skill. Category and level fall back to
/// `other` / `middle` when omitted.
pub async fn create_skill(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Skill>), AppError> {
    let payload = decode_payload(body)?;

    let name = match payload.name.as_deref().map(|n| sanitize_text(n, MAX_NAME_CHARS)) {
        Some(n) if !n.is_empty() => n,
        _ => {
            return Err(AppError::BadRequest(
                "Skill name is required and must be a string".to_string(),
            ));
        }
    };

    let skill = Skill {
        id: Uuid::new_v4().to_string(),
        name,
        category: payload.category.unwrap_or(SkillCategory::Other),
        level: payload.level.unwrap_or(SkillLevel::Middle),
        is_core: payload.is_core,
    };

    let created = skills::create(&state.store, skill).await?;
    tracing::info!(action = "skill_created", id = %created.id, "Skill created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/skills/{id}
pub async fn update_skill(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Skill>, AppError> {
    let payload = decode_payload(body)?;

    let name = match payload.name.as_deref().map(|n| sanitize_text(n, MAX_NAME_CHARS)) {
        Some(n) if n.is_empty() => {
            return Err(AppError::BadRequest(
                "Skill name is required and must be a string".to_string(),
            ));
        }
        other => other,
    };
    let payload = SkillPayload { name, ..payload };

    let updated = skills::update(&state.store, &id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

    tracing::info!(action = "skill_updated", id = %updated.id, "Skill updated");
    Ok(Json(updated))
}

/// DELETE /api/skills/{id}
pub async fn delete_skill(
    State(state): State<AppState>,
    AdminAuth(_identity): AdminAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !skills::delete(&state.store, &id).await? {
        return Err(AppError::NotFound("Skill not found".to_string()));
    }

    tracing::info!(action = "skill_deleted", id = %id, "Skill deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Deserialize a skill payload, surfacing a name of the wrong type as the
/// same 400 as a missing name.
fn decode_payload(body: serde_json::Value) -> Result<SkillPayload, AppError> {
    if let Some(name) = body.get("name") {
        if !name.is_null() && !name.is_string() {
            return Err(AppError::BadRequest(
                "Skill name is required and must be a string".to_string(),
            ));
        }
    }

    serde_json::from_value(body).map_err(|_| AppError::BadRequest("Invalid skill data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rejects_numeric_name() {
        let err = decode_payload(json!({"name": 42})).unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(msg) if msg == "Skill name is required and must be a string"
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_category() {
        assert!(decode_payload(json!({"name": "Docker", "category": "devops"})).is_err());
    }

    #[test]
    fn test_decode_accepts_partial_payload() {
        let payload = decode_payload(json!({"level": "advanced"})).unwrap();
        assert!(payload.name.is_none());
        assert_eq!(payload.level, Some(SkillLevel::Advanced));
    }
}
