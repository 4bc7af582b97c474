/// Task search endpoint
///
/// Case-insensitive substring match on title OR description, ANDed with
/// optional exact filters. Wildcard semantics are permissive: empty text
/// matches everything, and an empty, missing, `"0"`, or unparseable
/// status/priority/project value simply drops that filter (mirroring the
/// original UI, which sends `"0"` for "all projects").
///
/// # Endpoint
///
/// ```text
/// GET /v1/search?q=bug&status=Pending&priority=&project_id=0
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use taskdeck_shared::models::task::{SearchHit, Task, TaskPriority, TaskSearch, TaskStatus};
use uuid::Uuid;

/// Longest accepted search text
const MAX_SEARCH: usize = 200;

/// Raw query parameters as the page script sends them
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub priority: String,

    #[serde(default)]
    pub project_id: String,
}

impl SearchParams {
    /// Converts raw parameters into typed search criteria
    ///
    /// Pure; unparseable filter values become wildcards rather than errors.
    fn into_search(self) -> TaskSearch {
        TaskSearch {
            text: self.q.trim().to_string(),
            status: TaskStatus::parse_filter(&self.status),
            priority: TaskPriority::parse_filter(&self.priority),
            project_id: Uuid::parse_str(self.project_id.trim()).ok(),
        }
    }
}

/// Searches tasks
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Search text longer than 200 characters
pub async fn search_tasks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    if params.q.trim().len() > MAX_SEARCH {
        return Err(ApiError::validation(
            "q",
            format!("Search text must be at most {} characters", MAX_SEARCH),
        ));
    }

    let search = params.into_search();
    let hits = Task::search(&state.db, &search).await?;

    Ok(Json(hits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_are_wildcards() {
        let search = SearchParams::default().into_search();
        assert_eq!(search.text, "");
        assert_eq!(search.status, None);
        assert_eq!(search.priority, None);
        assert_eq!(search.project_id, None);
    }

    #[test]
    fn test_project_id_zero_means_all_projects() {
        let params = SearchParams {
            project_id: "0".to_string(),
            ..Default::default()
        };
        assert_eq!(params.into_search().project_id, None);
    }

    #[test]
    fn test_valid_filters_parse() {
        let project = Uuid::new_v4();
        let params = SearchParams {
            q: "  bug ".to_string(),
            status: "In Progress".to_string(),
            priority: "high".to_string(),
            project_id: project.to_string(),
        };

        let search = params.into_search();
        assert_eq!(search.text, "bug");
        assert_eq!(search.status, Some(TaskStatus::InProgress));
        assert_eq!(search.priority, Some(TaskPriority::High));
        assert_eq!(search.project_id, Some(project));
    }

    #[test]
    fn test_garbage_filters_are_wildcards() {
        let params = SearchParams {
            status: "bogus".to_string(),
            priority: "urgent-ish".to_string(),
            project_id: "not-a-uuid".to_string(),
            ..Default::default()
        };

        let search = params.into_search();
        assert_eq!(search.status, None);
        assert_eq!(search.priority, None);
        assert_eq!(search.project_id, None);
    }
}
