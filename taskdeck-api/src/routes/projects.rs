/// Project endpoints
///
/// Projects are open to every authenticated user; there is no per-project
/// permission model. Deleting a project does not cascade to its tasks;
/// they keep the dangling reference and render as "No project".
///
/// # Endpoints
///
/// - `GET    /v1/projects` - List projects
/// - `POST   /v1/projects` - Create project
/// - `PUT    /v1/projects/:id` - Update name/description
/// - `DELETE /v1/projects/:id` - Delete (tasks untouched)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskdeck_shared::{
    auth::middleware::AuthContext,
    models::project::{CreateProject, Project},
};
use uuid::Uuid;
use validator::Validate;

/// Create/update project request
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(max = 80, message = "Project name must be at most 80 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Project description must be at most 2000 characters"))]
    pub description: String,
}

impl ProjectRequest {
    fn validated_name(&self) -> ApiResult<String> {
        self.validate().map_err(ApiError::from_validation)?;
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("name", "Project name is required"));
        }
        Ok(name)
    }
}

/// Lists all projects ordered by name
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list(&state.db).await?;
    Ok(Json(projects))
}

/// Creates a project
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<Project>> {
    let name = req.validated_name()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name,
            description: req.description,
            created_by: Some(auth.user_id),
        },
    )
    .await?;

    tracing::info!(project_id = %project.id, "Project created");

    Ok(Json(project))
}

/// Updates a project's name and description
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectRequest>,
) -> ApiResult<Json<Project>> {
    let name = req.validated_name()?;

    let project = Project::update(&state.db, id, &name, &req.description)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Deletes a project
///
/// Tasks referencing the project are left in place.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = Project::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = %id, "Project deleted");

    Ok(Json(serde_json::json!({ "deleted": id })))
}
