/// CSV export endpoint
///
/// Streams nothing fancy: the full task table is rendered into one CSV
/// string and returned as an attachment. The output starts with a UTF-8
/// BOM so spreadsheet applications detect the encoding (original system
/// behavior), and uses "No project"/"Unassigned" placeholders for unset
/// references.
///
/// # Endpoint
///
/// ```text
/// GET /v1/export/csv        -> attachment "tasks_export.csv"
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use taskdeck_shared::models::task::{Task, TaskOverview};

/// UTF-8 byte order mark, for spreadsheet encoding detection
const UTF8_BOM: &str = "\u{feff}";

const CSV_HEADER: [&str; 7] = ["ID", "Title", "Status", "Priority", "Project", "Assigned", "Due"];

/// Quotes a CSV field when it contains a delimiter, quote, or newline
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders the task table as CSV text (without the BOM)
fn render_csv(tasks: &[TaskOverview]) -> String {
    let mut out = String::new();
    out.push_str(&csv_row(
        &CSV_HEADER.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
    ));
    out.push_str("\r\n");

    for task in tasks {
        let row = [
            task.id.to_string(),
            task.title.clone(),
            task.status.as_str().to_string(),
            task.priority.as_str().to_string(),
            task.project_name.clone().unwrap_or_else(|| "No project".to_string()),
            task.assignee_username.clone().unwrap_or_else(|| "Unassigned".to_string()),
            task.due_date.map(|d| d.to_string()).unwrap_or_default(),
        ];
        out.push_str(&csv_row(&row));
        out.push_str("\r\n");
    }

    out
}

/// Exports all tasks as a CSV attachment
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let tasks = Task::list_overview(&state.db).await?;

    let body = format!("{}{}", UTF8_BOM, render_csv(&tasks));

    let response = (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"tasks_export.csv\"",
            ),
        ],
        body,
    )
        .into_response();

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_shared::models::task::{TaskPriority, TaskStatus};
    use uuid::Uuid;

    #[test]
    fn test_csv_escape_plain_field_untouched() {
        assert_eq!(csv_escape("hello"), "hello");
    }

    #[test]
    fn test_csv_escape_quotes_delimiters() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_render_csv_header_and_placeholders() {
        let task = TaskOverview {
            id: Uuid::nil(),
            title: "Fix bug, urgently".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            project_name: None,
            assignee_username: None,
            due_date: None,
        };

        let csv = render_csv(&[task]);
        let mut lines = csv.lines();

        assert_eq!(lines.next().unwrap(), "ID,Title,Status,Priority,Project,Assigned,Due");
        let row = lines.next().unwrap();
        assert!(row.contains("\"Fix bug, urgently\""));
        assert!(row.contains("No project"));
        assert!(row.contains("Unassigned"));
        assert!(row.ends_with(','));
    }
}
