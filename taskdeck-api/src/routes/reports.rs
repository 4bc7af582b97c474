/// Report endpoint
///
/// Reports aggregate the current task set into an ordered list of
/// formatted lines; nothing is persisted. Status/priority reports include
/// zero counts in declaration order so the output is deterministic;
/// project/user reports follow their listing order (by name).
///
/// # Endpoint
///
/// ```text
/// GET /v1/reports/:kind        kind ∈ tasks | priorities | projects | users
/// ```
///
/// # Response
///
/// ```json
/// { "lines": ["Pending: 3 tasks", "In Progress: 1 tasks", "Completed: 0 tasks"] }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use taskdeck_shared::models::{
    project::Project,
    task::{Task, TaskPriority, TaskStatus},
    user::User,
};

/// Report payload
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub lines: Vec<String>,
}

/// Supported report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Tasks,
    Priorities,
    Projects,
    Users,
}

impl ReportKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "tasks" => Some(ReportKind::Tasks),
            "priorities" => Some(ReportKind::Priorities),
            "projects" => Some(ReportKind::Projects),
            "users" => Some(ReportKind::Users),
            _ => None,
        }
    }
}

/// Formats per-status counts, all statuses present, zero counts included
fn format_status_lines(counts: &[(TaskStatus, i64)]) -> Vec<String> {
    TaskStatus::ALL
        .iter()
        .map(|status| {
            let n = counts
                .iter()
                .find(|(s, _)| s == status)
                .map(|(_, n)| *n)
                .unwrap_or(0);
            format!("{}: {} tasks", status.as_str(), n)
        })
        .collect()
}

/// Formats per-priority counts, all priorities present, zero counts included
fn format_priority_lines(counts: &[(TaskPriority, i64)]) -> Vec<String> {
    TaskPriority::ALL
        .iter()
        .map(|priority| {
            let n = counts
                .iter()
                .find(|(p, _)| p == priority)
                .map(|(_, n)| *n)
                .unwrap_or(0);
            format!("{}: {} tasks", priority.as_str(), n)
        })
        .collect()
}

/// Generates a report
///
/// # Errors
///
/// - `400 Bad Request`: Unknown report kind
pub async fn report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Json<ReportResponse>> {
    let kind = ReportKind::parse(&kind)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown report kind: {}", kind)))?;

    let lines = match kind {
        ReportKind::Tasks => {
            let counts = Task::status_counts(&state.db).await?;
            format_status_lines(&counts)
        }
        ReportKind::Priorities => {
            let counts = Task::priority_counts(&state.db).await?;
            format_priority_lines(&counts)
        }
        ReportKind::Projects => {
            let mut lines = Vec::new();
            for project in Project::list(&state.db).await? {
                let n = Task::count_by_project(&state.db, project.id).await?;
                lines.push(format!("{}: {} tasks", project.name, n));
            }
            lines
        }
        ReportKind::Users => {
            let mut lines = Vec::new();
            for user in User::list(&state.db).await? {
                let n = Task::count_by_assignee(&state.db, user.id).await?;
                lines.push(format!("{}: {} tasks assigned", user.username, n));
            }
            lines
        }
    };

    Ok(Json(ReportResponse { lines }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_kind() {
        assert_eq!(ReportKind::parse("tasks"), Some(ReportKind::Tasks));
        assert_eq!(ReportKind::parse("priorities"), Some(ReportKind::Priorities));
        assert_eq!(ReportKind::parse("projects"), Some(ReportKind::Projects));
        assert_eq!(ReportKind::parse("users"), Some(ReportKind::Users));
        assert_eq!(ReportKind::parse("bogus"), None);
    }

    #[test]
    fn test_status_lines_include_zero_counts() {
        let counts = vec![(TaskStatus::Pending, 3), (TaskStatus::Completed, 1)];
        let lines = format_status_lines(&counts);

        assert_eq!(
            lines,
            vec![
                "Pending: 3 tasks",
                "In Progress: 0 tasks",
                "Completed: 1 tasks",
            ]
        );
    }

    #[test]
    fn test_status_lines_order_is_fixed() {
        // Input order must not leak into output order.
        let counts = vec![(TaskStatus::Completed, 5), (TaskStatus::Pending, 2)];
        let lines = format_status_lines(&counts);
        assert!(lines[0].starts_with("Pending"));
        assert!(lines[2].starts_with("Completed"));
    }

    #[test]
    fn test_priority_lines() {
        let counts = vec![(TaskPriority::Critical, 2)];
        let lines = format_priority_lines(&counts);

        assert_eq!(
            lines,
            vec![
                "Low: 0 tasks",
                "Medium: 0 tasks",
                "High: 0 tasks",
                "Critical: 2 tasks",
            ]
        );
    }
}
