/// Task model and database operations
///
/// Tasks are the core entity of Taskdeck: a unit of work with status,
/// priority, optional project grouping, and optional assignee. Every
/// mutation of a task is mirrored by an append-only history entry (see
/// [`crate::audit`]); the task write and the history append happen in one
/// transaction so the task's current field values always match the
/// `new_value` of its most recent history entry for that field.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high', 'critical');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(100) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status task_status NOT NULL DEFAULT 'pending',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     project_id UUID,
///     assigned_to UUID,
///     created_by UUID NOT NULL,
///     due_date DATE,
///     estimated_hours DOUBLE PRECISION,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{Task, CreateTask, TaskStatus};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Fix bug".to_string(),
///     created_by: Uuid::new_v4(),
///     ..Default::default()
/// }).await?;
///
/// assert_eq!(task.status, TaskStatus::Pending);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Task workflow status
///
/// Wire values are the human-readable forms the page script renders
/// ("Pending", "In Progress", "Completed"); snake_case spellings are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    #[serde(rename = "Pending", alias = "pending")]
    Pending,

    #[serde(rename = "In Progress", alias = "in_progress", alias = "InProgress")]
    InProgress,

    #[serde(rename = "Completed", alias = "completed", alias = "Done", alias = "done")]
    Completed,
}

impl TaskStatus {
    /// All statuses in workflow order, for deterministic report output
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Display form, matching the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Parses a search-filter value; unknown or empty input is a wildcard
    pub fn parse_filter(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "in progress" | "in_progress" => Some(TaskStatus::InProgress),
            "completed" | "done" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
pub enum TaskPriority {
    #[serde(rename = "Low", alias = "low")]
    Low,

    #[serde(rename = "Medium", alias = "medium")]
    Medium,

    #[serde(rename = "High", alias = "high")]
    High,

    #[serde(rename = "Critical", alias = "critical")]
    Critical,
}

impl TaskPriority {
    /// All priorities from lowest to highest, for deterministic report output
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Critical,
    ];

    /// Display form, matching the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }

    /// Parses a search-filter value; unknown or empty input is a wildcard
    pub fn parse_filter(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            "critical" => Some(TaskPriority::Critical),
            _ => None,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short title (required, at most 100 characters)
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Project grouping (None = no project)
    pub project_id: Option<Uuid>,

    /// Assigned user (None = unassigned)
    pub assigned_to: Option<Uuid>,

    /// User who created the task
    pub created_by: Uuid,

    /// Due date (date only, no time component)
    pub due_date: Option<NaiveDate>,

    /// Estimated effort in hours (0 to 999)
    pub estimated_hours: Option<f64>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Status and priority fall back to Pending/Medium when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    pub project_id: Option<Uuid>,

    pub assigned_to: Option<Uuid>,

    /// The acting user; set by the handler, never taken from the request
    #[serde(skip)]
    pub created_by: Uuid,

    pub due_date: Option<NaiveDate>,

    pub estimated_hours: Option<f64>,
}

/// Partial update of a task
///
/// Outer `None` leaves the field unchanged. For nullable columns the inner
/// option distinguishes "set to a value" from "clear" (JSON `null`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,

    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    #[serde(default, with = "double_option")]
    pub project_id: Option<Option<Uuid>>,

    #[serde(default, with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,

    #[serde(default, with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,

    #[serde(default, with = "double_option")]
    pub estimated_hours: Option<Option<f64>>,
}

/// Deserializes an absent field as None and a present field (including
/// `null`) as Some(...), preserving the set/clear distinction.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}

/// One changed field between the stored task and the submitted values
///
/// `old` and `new` are the display renderings that get written to the
/// history log (empty string for cleared/unset values, matching the
/// original system's log format).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Column name of the changed field
    pub field: &'static str,

    /// Rendering of the previous value
    pub old: String,

    /// Rendering of the new value
    pub new: String,
}

impl FieldChange {
    /// Assignment changes are logged with their own history action and
    /// trigger a notification to the new assignee.
    pub fn is_assignment(&self) -> bool {
        self.field == "assigned_to"
    }
}

fn render_opt_uuid(v: Option<Uuid>) -> String {
    v.map(|u| u.to_string()).unwrap_or_default()
}

fn render_opt_date(v: Option<NaiveDate>) -> String {
    v.map(|d| d.to_string()).unwrap_or_default()
}

fn render_opt_hours(v: Option<f64>) -> String {
    v.map(|h| h.to_string()).unwrap_or_default()
}

impl Task {
    /// Applies a partial update, producing the merged task
    ///
    /// Pure; does not touch the database. `updated_at` is refreshed by the
    /// subsequent [`Task::update`] write, not here.
    pub fn merged_with(&self, update: &UpdateTask) -> Task {
        let mut merged = self.clone();
        if let Some(ref title) = update.title {
            merged.title = title.clone();
        }
        if let Some(ref description) = update.description {
            merged.description = description.clone();
        }
        if let Some(status) = update.status {
            merged.status = status;
        }
        if let Some(priority) = update.priority {
            merged.priority = priority;
        }
        if let Some(project_id) = update.project_id {
            merged.project_id = project_id;
        }
        if let Some(assigned_to) = update.assigned_to {
            merged.assigned_to = assigned_to;
        }
        if let Some(due_date) = update.due_date {
            merged.due_date = due_date;
        }
        if let Some(estimated_hours) = update.estimated_hours {
            merged.estimated_hours = estimated_hours;
        }
        merged
    }

    /// Field-level diff against a merged task
    ///
    /// Returns one [`FieldChange`] per field whose value differs, with the
    /// old/new renderings the audit recorder writes to the history log.
    /// Pure; no side effects.
    pub fn diff(&self, merged: &Task) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if self.title != merged.title {
            changes.push(FieldChange {
                field: "title",
                old: self.title.clone(),
                new: merged.title.clone(),
            });
        }
        if self.description != merged.description {
            changes.push(FieldChange {
                field: "description",
                old: self.description.clone(),
                new: merged.description.clone(),
            });
        }
        if self.status != merged.status {
            changes.push(FieldChange {
                field: "status",
                old: self.status.as_str().to_string(),
                new: merged.status.as_str().to_string(),
            });
        }
        if self.priority != merged.priority {
            changes.push(FieldChange {
                field: "priority",
                old: self.priority.as_str().to_string(),
                new: merged.priority.as_str().to_string(),
            });
        }
        if self.project_id != merged.project_id {
            changes.push(FieldChange {
                field: "project_id",
                old: render_opt_uuid(self.project_id),
                new: render_opt_uuid(merged.project_id),
            });
        }
        if self.assigned_to != merged.assigned_to {
            changes.push(FieldChange {
                field: "assigned_to",
                old: render_opt_uuid(self.assigned_to),
                new: render_opt_uuid(merged.assigned_to),
            });
        }
        if self.due_date != merged.due_date {
            changes.push(FieldChange {
                field: "due_date",
                old: render_opt_date(self.due_date),
                new: render_opt_date(merged.due_date),
            });
        }
        if self.estimated_hours != merged.estimated_hours {
            changes.push(FieldChange {
                field: "estimated_hours",
                old: render_opt_hours(self.estimated_hours),
                new: render_opt_hours(merged.estimated_hours),
            });
        }

        changes
    }

    /// Creates a new task
    ///
    /// Status defaults to Pending and priority to Medium when omitted.
    /// Callers append the matching `created` history entry in the same
    /// transaction (see [`crate::audit::record_created`]).
    pub async fn create<'e>(db: impl PgExecutor<'e>, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, project_id,
                               assigned_to, created_by, due_date, estimated_hours)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, status, priority, project_id,
                      assigned_to, created_by, due_date, estimated_hours,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status.unwrap_or(TaskStatus::Pending))
        .bind(data.priority.unwrap_or(TaskPriority::Medium))
        .bind(data.project_id)
        .bind(data.assigned_to)
        .bind(data.created_by)
        .bind(data.due_date)
        .bind(data.estimated_hours)
        .fetch_one(db)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, project_id,
                   assigned_to, created_by, due_date, estimated_hours,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Writes a merged task back, refreshing `updated_at`
    ///
    /// Returns the stored row, or None if the id didn't match. Callers
    /// append the matching history entries in the same transaction.
    pub async fn update<'e>(db: impl PgExecutor<'e>, task: &Task) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                priority = $5,
                project_id = $6,
                assigned_to = $7,
                due_date = $8,
                estimated_hours = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, project_id,
                      assigned_to, created_by, due_date, estimated_hours,
                      created_at, updated_at
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.project_id)
        .bind(task.assigned_to)
        .bind(task.due_date)
        .bind(task.estimated_hours)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// History rows referencing the task remain; comments and notifications
    /// are retained as orphans (matching the project non-cascade precedent).
    pub async fn delete<'e>(db: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all tasks joined with project and assignee display names
    ///
    /// This is the dashboard-table payload. Ordered newest first with the
    /// id as a tiebreaker so output is deterministic.
    pub async fn list_overview(pool: &PgPool) -> Result<Vec<TaskOverview>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TaskOverview>(
            r#"
            SELECT t.id, t.title, t.status, t.priority,
                   p.name AS project_name,
                   u.username AS assignee_username,
                   t.due_date
            FROM tasks t
            LEFT JOIN projects p ON p.id = t.project_id
            LEFT JOIN users u ON u.id = t.assigned_to
            ORDER BY t.created_at DESC, t.id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Searches tasks by substring text plus optional exact filters
    ///
    /// Text matches case-insensitively against title OR description; an
    /// empty text matches everything. `None` filters are wildcards. Results
    /// join the project display name ("No project" when unset) and come
    /// back in the same deterministic order as [`Task::list_overview`].
    pub async fn search(pool: &PgPool, query: &TaskSearch) -> Result<Vec<SearchHit>, sqlx::Error> {
        // Escape LIKE metacharacters so user text is matched literally.
        let pattern = query
            .text
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");

        let hits = sqlx::query_as::<_, SearchHit>(
            r#"
            SELECT t.id, t.title, t.status, t.priority,
                   COALESCE(p.name, 'No project') AS project
            FROM tasks t
            LEFT JOIN projects p ON p.id = t.project_id
            WHERE ($1 = '' OR t.title ILIKE '%' || $1 || '%'
                           OR t.description ILIKE '%' || $1 || '%')
              AND ($2::task_status IS NULL OR t.status = $2)
              AND ($3::task_priority IS NULL OR t.priority = $3)
              AND ($4::uuid IS NULL OR t.project_id = $4)
            ORDER BY t.created_at DESC, t.id ASC
            "#,
        )
        .bind(pattern)
        .bind(query.status)
        .bind(query.priority)
        .bind(query.project_id)
        .fetch_all(pool)
        .await?;

        Ok(hits)
    }

    /// Counts tasks per status
    pub async fn status_counts(pool: &PgPool) -> Result<Vec<(TaskStatus, i64)>, sqlx::Error> {
        let counts = sqlx::query_as::<_, (TaskStatus, i64)>(
            "SELECT status, COUNT(*) FROM tasks GROUP BY status",
        )
        .fetch_all(pool)
        .await?;

        Ok(counts)
    }

    /// Counts tasks per priority
    pub async fn priority_counts(pool: &PgPool) -> Result<Vec<(TaskPriority, i64)>, sqlx::Error> {
        let counts = sqlx::query_as::<_, (TaskPriority, i64)>(
            "SELECT priority, COUNT(*) FROM tasks GROUP BY priority",
        )
        .fetch_all(pool)
        .await?;

        Ok(counts)
    }

    /// Counts tasks belonging to a project
    pub async fn count_by_project(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts tasks assigned to a user
    pub async fn count_by_assignee(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE assigned_to = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Dashboard aggregates over the whole task set
    pub async fn stats(pool: &PgPool) -> Result<TaskStats, sqlx::Error> {
        let (total, completed, high_priority, overdue): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'completed'),
                   COUNT(*) FILTER (WHERE priority IN ('high', 'critical')),
                   COUNT(*) FILTER (WHERE due_date < CURRENT_DATE
                                      AND status <> 'completed')
            FROM tasks
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(TaskStats {
            total,
            completed,
            pending: total - completed,
            high_priority,
            overdue,
        })
    }
}

/// Dashboard row: a task joined with its project/assignee display names
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TaskOverview {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_name: Option<String>,
    pub assignee_username: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Search criteria
///
/// Empty text matches all; `None` filters are wildcards.
#[derive(Debug, Clone, Default)]
pub struct TaskSearch {
    pub text: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub project_id: Option<Uuid>,
}

/// One search result row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SearchHit {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project: String,
}

/// Dashboard aggregates
#[derive(Debug, Clone, Serialize)]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub high_priority: i64,
    pub overdue: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Fix bug".to_string(),
            description: "Crash on save".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            project_id: None,
            assigned_to: None,
            created_by: Uuid::new_v4(),
            due_date: None,
            estimated_hours: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "Pending");
        assert_eq!(TaskStatus::InProgress.as_str(), "In Progress");
        assert_eq!(TaskStatus::Completed.as_str(), "Completed");
    }

    #[test]
    fn test_status_parse_filter() {
        assert_eq!(TaskStatus::parse_filter("Pending"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse_filter("in progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse_filter("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse_filter("done"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse_filter(""), None);
        assert_eq!(TaskStatus::parse_filter("bogus"), None);
    }

    #[test]
    fn test_priority_parse_filter() {
        assert_eq!(TaskPriority::parse_filter(" High "), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse_filter("critical"), Some(TaskPriority::Critical));
        assert_eq!(TaskPriority::parse_filter(""), None);
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let s: TaskStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(s, TaskStatus::InProgress);
        let s: TaskStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(s, TaskStatus::Completed);
    }

    #[test]
    fn test_merge_applies_only_submitted_fields() {
        let task = sample_task();
        let update = UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };

        let merged = task.merged_with(&update);
        assert_eq!(merged.status, TaskStatus::Completed);
        assert_eq!(merged.title, task.title);
        assert_eq!(merged.priority, task.priority);
    }

    #[test]
    fn test_merge_clears_nullable_field() {
        let mut task = sample_task();
        task.assigned_to = Some(Uuid::new_v4());

        let update = UpdateTask {
            assigned_to: Some(None),
            ..Default::default()
        };

        let merged = task.merged_with(&update);
        assert_eq!(merged.assigned_to, None);
    }

    #[test]
    fn test_diff_no_changes_is_empty() {
        let task = sample_task();
        let merged = task.merged_with(&UpdateTask::default());
        assert!(task.diff(&merged).is_empty());
    }

    #[test]
    fn test_diff_captures_status_change() {
        let task = sample_task();
        let merged = task.merged_with(&UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        });

        let changes = task.diff(&merged);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "status");
        assert_eq!(changes[0].old, "Pending");
        assert_eq!(changes[0].new, "Completed");
        assert!(!changes[0].is_assignment());
    }

    #[test]
    fn test_diff_flags_assignment_change() {
        let task = sample_task();
        let assignee = Uuid::new_v4();
        let merged = task.merged_with(&UpdateTask {
            assigned_to: Some(Some(assignee)),
            ..Default::default()
        });

        let changes = task.diff(&merged);
        assert_eq!(changes.len(), 1);
        assert!(changes[0].is_assignment());
        assert_eq!(changes[0].old, "");
        assert_eq!(changes[0].new, assignee.to_string());
    }

    #[test]
    fn test_diff_multiple_fields() {
        let task = sample_task();
        let merged = task.merged_with(&UpdateTask {
            title: Some("Fix crash".to_string()),
            priority: Some(TaskPriority::High),
            due_date: Some(Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())),
            ..Default::default()
        });

        let changes = task.diff(&merged);
        let fields: Vec<&str> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["title", "priority", "due_date"]);
        let due = changes.iter().find(|c| c.field == "due_date").unwrap();
        assert_eq!(due.new, "2026-09-01");
    }

    #[test]
    fn test_update_task_deserializes_absent_vs_null() {
        // Absent field: unchanged. Explicit null: clear.
        let update: UpdateTask = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(update.assigned_to, None);

        let update: UpdateTask = serde_json::from_str(r#"{"assigned_to": null}"#).unwrap();
        assert_eq!(update.assigned_to, Some(None));
    }
}
