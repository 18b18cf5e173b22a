//! Skill repository operations over `skills.json`.

use crate::models::{Skill, SkillPayload};
use crate::storage::{Store, StoreError};

const SKILLS_FILE: &str = "skills.json";

/// List all skills in insertion order.
pub async fn list(store: &Store) -> Result<Vec<Skill>, StoreError> {
    Ok(store.read(SKILLS_FILE).await?.unwrap_or_default())
}

/// Append a new skill.
pub async fn create(store: &Store, skill: Skill) -> Result<Skill, StoreError> {
    let _guard = store.lock_for_update().await;
    let mut skills: Vec<Skill> = store.read_file(SKILLS_FILE).await?.unwrap_or_default();
    skills.push(skill.clone());
    store.write_file(SKILLS_FILE, &skills).await?;
    Ok(skill)
}

/// Merge a partial update into an existing skill. Returns None when the ID
/// is unknown.
pub async fn update(
    store: &Store,
    id: &str,
    updates: SkillPayload,
) -> Result<Option<Skill>, StoreError> {
    let _guard = store.lock_for_update().await;
    let mut skills: Vec<Skill> = store.read_file(SKILLS_FILE).await?.unwrap_or_default();

    let Some(skill) = skills.iter_mut().find(|s| s.id == id) else {
        return Ok(None);
    };

    if let Some(name) = updates.name {
        skill.name = name;
    }
    if let Some(category) = updates.category {
        skill.category = category;
    }
    if let Some(level) = updates.level {
        skill.level = level;
    }
    if let Some(is_core) = updates.is_core {
        skill.is_core = Some(is_core);
    }

    let updated = skill.clone();
    store.write_file(SKILLS_FILE, &skills).await?;
    Ok(Some(updated))
}

/// Delete a skill. Returns true if it existed.
pub async fn delete(store: &Store, id: &str) -> Result<bool, StoreError> {
    let _guard = store.lock_for_update().await;
    let mut skills: Vec<Skill> = store.read_file(SKILLS_FILE).await?.unwrap_or_default();

    let before = skills.len();
    skills.retain(|s| s.id != id);
    if skills.len() == before {
        return Ok(false);
    }

    store.write_file(SKILLS_FILE, &skills).await?;
    Ok(true)
}
