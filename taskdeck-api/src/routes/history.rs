/// History (audit log) endpoints
///
/// Read-only views over the append-only history table. Entries for deleted
/// tasks stay retrievable by the old task id; that is the point of the
/// audit log.
///
/// # Endpoints
///
/// - `GET /v1/history` - Most recent entries across all tasks
/// - `GET /v1/history/:task_id` - Entries for one task

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use taskdeck_shared::models::history::{HistoryEntry, HistoryView};
use uuid::Uuid;

/// Cap on entries returned per request
const HISTORY_LIMIT: i64 = 100;

/// Most recent history entries across all tasks
pub async fn recent_history(State(state): State<AppState>) -> ApiResult<Json<Vec<HistoryView>>> {
    let entries = HistoryEntry::list_recent(&state.db, HISTORY_LIMIT).await?;
    Ok(Json(entries))
}

/// History for one task (including deleted tasks)
pub async fn task_history(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<HistoryView>>> {
    let entries = HistoryEntry::list_for_task(&state.db, task_id, HISTORY_LIMIT).await?;
    Ok(Json(entries))
}
