/// Notification endpoints
///
/// Notifications are written by the audit recorder during task mutations;
/// this surface only reads them and marks them seen.
///
/// # Endpoints
///
/// - `GET  /v1/notifications` - Current user's unread notifications
/// - `POST /v1/notifications/read` - Mark all of the current user's read

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskdeck_shared::{auth::middleware::AuthContext, models::notification::Notification};

/// Current user's unread notifications, newest first
pub async fn list_unread(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = Notification::list_unread(&state.db, auth.user_id).await?;
    Ok(Json(notifications))
}

/// Marks all of the current user's notifications read
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<serde_json::Value>> {
    let marked = Notification::mark_all_read(&state.db, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "marked": marked })))
}
