/// Dashboard statistics endpoint
///
/// The header tiles of the dashboard: total/completed/pending counts, how
/// many tasks are High or Critical priority, and how many are overdue
/// (due before today and not Completed).
///
/// # Endpoint
///
/// ```text
/// GET /v1/stats
/// ```
///
/// # Response
///
/// ```json
/// { "total": 12, "completed": 4, "pending": 8, "high_priority": 3, "overdue": 2 }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use taskdeck_shared::models::task::{Task, TaskStats};

/// Dashboard aggregates over the whole task set
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<TaskStats>> {
    let stats = Task::stats(&state.db).await?;
    Ok(Json(stats))
}
