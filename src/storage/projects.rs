//! Project repository operations over `projects.json`.

use crate::models::{Project, ProjectPayload};
use crate::storage::{Store, StoreError};

const PROJECTS_FILE: &str = "projects.json";

/// List all projects, newest year first.
pub async fn list(store: &Store) -> Result<Vec<Project>, StoreError> {
    let mut projects: Vec<Project> = store.read(PROJECTS_FILE).await?.unwrap_or_default();
    projects.sort_by(|a, b| b.year.cmp(&a.year));
    Ok(projects)
}

/// Get a single project by ID.
pub async fn get(store: &Store, id: &str) -> Result<Option<Project>, StoreError> {
    let projects: Vec<Project> = store.read(PROJECTS_FILE).await?.unwrap_or_default();
    Ok(projects.into_iter().find(|p| p.id == id))
}

/// Append a new project.
pub async fn create(store: &Store, project: Project) -> Result<Project, StoreError> {
    let _guard = store.lock_for_update().await;
    let mut projects: Vec<Project> = store.read_file(PROJECTS_FILE).await?.unwrap_or_default();
    projects.push(project.clone());
    store.write_file(PROJECTS_FILE, &projects).await?;
    Ok(project)
}

/// Merge a partial update into an existing project. Returns the updated
/// project, or None if the ID is unknown. The ID itself never changes.
pub async fn update(
    store: &Store,
    id: &str,
    updates: ProjectPayload,
) -> Result<Option<Project>, StoreError> {
    let _guard = store.lock_for_update().await;
    let mut projects: Vec<Project> = store.read_file(PROJECTS_FILE).await?.unwrap_or_default();

    let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
        return Ok(None);
    };

    if let Some(title) = updates.title {
        project.title = title;
    }
    if let Some(description) = updates.description {
        project.description = description;
    }
    if let Some(tech_stack) = updates.tech_stack {
        project.tech_stack = tech_stack;
    }
    if let Some(year) = updates.year {
        project.year = year;
    }
    if let Some(status) = updates.status {
        project.status = status;
    }
    if let Some(url) = updates.url {
        project.url = Some(url);
    }
    if let Some(images) = updates.images {
        project.images = Some(images);
    }

    let updated = project.clone();
    store.write_file(PROJECTS_FILE, &projects).await?;
    Ok(Some(updated))
}

/// Delete a project. Returns true if it existed.
pub async fn delete(store: &Store, id: &str) -> Result<bool, StoreError> {
    let _guard = store.lock_for_update().await;
    let mut projects: Vec<Project> = store.read_file(PROJECTS_FILE).await?.unwrap_or_default();

    let before = projects.len();
    projects.retain(|p| p.id != id);
    if projects.len() == before {
        return Ok(false);
    }

    store.write_file(PROJECTS_FILE, &projects).await?;
    Ok(true)
}
