/// Task endpoints
///
/// The core CRUD surface. Every mutation runs the permission policy first,
/// then performs the task write, the history append, and any notification
/// insert inside a single transaction, so the audit log can never disagree
/// with the task table.
///
/// # Endpoints
///
/// - `GET    /v1/tasks` - Dashboard table (tasks joined with display names)
/// - `POST   /v1/tasks` - Create task
/// - `GET    /v1/tasks/:id` - Fetch one task
/// - `PUT    /v1/tasks/:id` - Partial update
/// - `DELETE /v1/tasks/:id` - Delete (history survives)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use taskdeck_shared::{
    audit,
    auth::{middleware::AuthContext, policy},
    models::{
        notification::NotificationKind,
        task::{CreateTask, Task, TaskOverview, TaskPriority, TaskStatus, UpdateTask},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title (required)
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: String,

    /// Free-text description
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    /// Defaults to Pending
    pub status: Option<TaskStatus>,

    /// Defaults to Medium
    pub priority: Option<TaskPriority>,

    pub project_id: Option<Uuid>,

    pub assigned_to: Option<Uuid>,

    pub due_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, max = 999.0, message = "Estimated hours must be between 0 and 999"))]
    pub estimated_hours: Option<f64>,
}

/// Update task request
///
/// All fields optional; absent fields are left unchanged, explicit `null`
/// clears a nullable field. Validated by hand because of the nested
/// options.
pub type UpdateTaskRequest = UpdateTask;

fn validate_update(req: &UpdateTaskRequest) -> ApiResult<()> {
    if let Some(ref title) = req.title {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ApiError::validation("title", "Title is required"));
        }
        if trimmed.len() > 100 {
            return Err(ApiError::validation(
                "title",
                "Title must be at most 100 characters",
            ));
        }
    }
    if let Some(ref description) = req.description {
        if description.len() > 5000 {
            return Err(ApiError::validation(
                "description",
                "Description must be at most 5000 characters",
            ));
        }
    }
    if let Some(Some(hours)) = req.estimated_hours {
        if !(0.0..=999.0).contains(&hours) {
            return Err(ApiError::validation(
                "estimated_hours",
                "Estimated hours must be between 0 and 999",
            ));
        }
    }
    Ok(())
}

/// Checks a submitted assignee id against the users table
///
/// The store has no foreign keys, so dangling user references are caught
/// here at write time.
async fn require_assignee_exists(state: &AppState, assignee: Uuid) -> ApiResult<()> {
    if !User::exists(&state.db, assignee).await? {
        return Err(ApiError::validation(
            "assigned_to",
            "Assigned user does not exist",
        ));
    }
    Ok(())
}

/// Lists all tasks with project and assignee display names
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskOverview>>> {
    let tasks = Task::list_overview(&state.db).await?;
    Ok(Json(tasks))
}

/// Fetches one task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Creates a task
///
/// The acting user becomes `created_by`; status/priority default to
/// Pending/Medium. The task insert, its `created` history entry, and the
/// assignment notification (when created with an assignee) commit
/// together.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Missing/oversized title, bad hours,
///   nonexistent assignee
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::validation("title", "Title is required"));
    }

    if let Some(assignee) = req.assigned_to {
        require_assignee_exists(&state, assignee).await?;
    }

    let mut tx = state.db.begin().await?;

    let task = Task::create(
        &mut *tx,
        CreateTask {
            title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            project_id: req.project_id,
            assigned_to: req.assigned_to,
            created_by: auth.user_id,
            due_date: req.due_date,
            estimated_hours: req.estimated_hours,
        },
    )
    .await?;

    audit::record_created(&mut tx, &task, auth.user_id).await?;

    if let Some(assignee) = task.assigned_to {
        audit::notify(
            &mut tx,
            assignee,
            NotificationKind::TaskAssigned,
            format!("New task assigned: {}", task.title),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    Ok(Json(task))
}

/// Updates a task
///
/// Loads the task, runs the permission policy (admin, creator, or
/// assignee), merges the submitted fields, and writes the result plus one
/// history entry per changed field in a single transaction. An assignment
/// change notifies the new assignee; any other change notifies the current
/// assignee, if there is one.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither admin, creator, nor assignee
/// - `404 Not Found`: No task with this id
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    validate_update(&req)?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    policy::require_modify(auth.user_id, auth.role, &task)?;

    if let Some(Some(assignee)) = req.assigned_to {
        require_assignee_exists(&state, assignee).await?;
    }

    let mut merged = task.merged_with(&req);
    merged.title = merged.title.trim().to_string();

    let changes = task.diff(&merged);
    if changes.is_empty() {
        return Ok(Json(task));
    }

    let mut tx = state.db.begin().await?;

    let stored = Task::update(&mut *tx, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    audit::record_changes(&mut tx, stored.id, auth.user_id, &changes).await?;

    let assignment_changed = changes.iter().any(|c| c.is_assignment());
    if assignment_changed {
        if let Some(new_assignee) = stored.assigned_to {
            audit::notify(
                &mut tx,
                new_assignee,
                NotificationKind::TaskAssigned,
                format!("New task assigned: {}", stored.title),
            )
            .await?;
        }
    } else if let Some(assignee) = stored.assigned_to {
        audit::notify(
            &mut tx,
            assignee,
            NotificationKind::TaskUpdated,
            format!("Task updated: {}", stored.title),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        task_id = %stored.id,
        user_id = %auth.user_id,
        changed_fields = changes.len(),
        "Task updated"
    );

    Ok(Json(stored))
}

/// Deletes a task
///
/// The `deleted` history entry is written in the same transaction and
/// references the removed task id; history survives the deletion. Comments
/// and notifications for the task are retained as orphans.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither admin, creator, nor assignee
/// - `404 Not Found`: No task with this id
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    policy::require_modify(auth.user_id, auth.role, &task)?;

    let mut tx = state.db.begin().await?;

    audit::record_deleted(&mut tx, &task, auth.user_id).await?;
    Task::delete(&mut *tx, task.id).await?;

    tx.commit().await?;

    tracing::info!(task_id = %task.id, user_id = %auth.user_id, "Task deleted");

    Ok(Json(serde_json::json!({ "deleted": task.id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update_rejects_empty_title() {
        let req = UpdateTaskRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());
    }

    #[test]
    fn test_validate_update_rejects_out_of_range_hours() {
        let req = UpdateTaskRequest {
            estimated_hours: Some(Some(1000.0)),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());

        let req = UpdateTaskRequest {
            estimated_hours: Some(Some(-1.0)),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());
    }

    #[test]
    fn test_validate_update_accepts_cleared_hours() {
        let req = UpdateTaskRequest {
            estimated_hours: Some(None),
            ..Default::default()
        };
        assert!(validate_update(&req).is_ok());
    }

    #[test]
    fn test_validate_update_accepts_partial_body() {
        let req = UpdateTaskRequest {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(validate_update(&req).is_ok());
    }
}
