/// Comment endpoints
///
/// Comments are immutable: there is no edit or delete. Adding a comment
/// requires the task to exist; listing does not, so comments orphaned by a
/// task deletion stay readable.
///
/// # Endpoints
///
/// - `GET  /v1/tasks/:id/comments` - Comments with author usernames, oldest first
/// - `POST /v1/tasks/:id/comments` - Add a comment

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
    models::{
        comment::{Comment, CommentView},
        task::Task,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Add comment request
#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    /// Comment text
    #[validate(length(max = 3000, message = "Comment must be at most 3000 characters"))]
    pub text: String,
}

/// Lists a task's comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentView>>> {
    let comments = Comment::list_for_task(&state.db, task_id).await?;
    Ok(Json(comments))
}

/// Adds a comment to a task
///
/// # Errors
///
/// - `404 Not Found`: No task with this id
/// - `422 Unprocessable Entity`: Empty or oversized text
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<Json<Comment>> {
    req.validate().map_err(ApiError::from_validation)?;

    let text = req.text.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::validation("text", "Comment cannot be empty"));
    }

    Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let comment = Comment::create(&state.db, task_id, auth.user_id, text).await?;

    Ok(Json(comment))
}
