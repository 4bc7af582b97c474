/// History model: the append-only audit log of task changes
///
/// Every task mutation appends one or more entries here, in the same
/// transaction as the mutation itself. Entries are never updated or
/// deleted, and there is no foreign key to `tasks`: history survives task
/// deletion and stays retrievable by the deleted task's id.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE history_action AS ENUM ('created', 'updated', 'deleted', 'assigned');
///
/// CREATE TABLE history (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL,
///     user_id UUID NOT NULL,
///     action history_action NOT NULL,
///     field VARCHAR(32),
///     old_value TEXT NOT NULL DEFAULT '',
///     new_value TEXT NOT NULL DEFAULT '',
///     recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// What kind of change an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "history_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Task was created (new_value = title)
    Created,

    /// A field changed (field/old_value/new_value capture the diff)
    Updated,

    /// Task was deleted (old_value = title)
    Deleted,

    /// assigned_to changed (old/new are user ids, empty when unset)
    Assigned,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Created => "created",
            HistoryAction::Updated => "updated",
            HistoryAction::Deleted => "deleted",
            HistoryAction::Assigned => "assigned",
        }
    }
}

/// One audit record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub id: Uuid,

    /// Task the entry describes (may no longer exist)
    pub task_id: Uuid,

    /// Acting user
    pub user_id: Uuid,

    pub action: HistoryAction,

    /// Changed column for `updated`/`assigned` entries
    pub field: Option<String>,

    pub old_value: String,

    pub new_value: String,

    pub recorded_at: DateTime<Utc>,
}

/// Input for appending an entry
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub task_id: Uuid,
    pub user_id: Uuid,
    pub action: HistoryAction,
    pub field: Option<String>,
    pub old_value: String,
    pub new_value: String,
}

/// History entry joined with the actor's username, for the history panel
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryView {
    pub id: Uuid,
    pub task_id: Uuid,

    /// Actor username ("?" if the user was deleted)
    pub user: String,

    pub action: HistoryAction,
    pub field: Option<String>,
    pub old_value: String,
    pub new_value: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Appends one entry
    ///
    /// Runs on whatever executor the caller provides so it can share the
    /// transaction of the mutation it describes.
    pub async fn append<'e>(
        db: impl PgExecutor<'e>,
        entry: NewHistoryEntry,
    ) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO history (task_id, user_id, action, field, old_value, new_value)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, task_id, user_id, action, field, old_value, new_value, recorded_at
            "#,
        )
        .bind(entry.task_id)
        .bind(entry.user_id)
        .bind(entry.action)
        .bind(entry.field)
        .bind(entry.old_value)
        .bind(entry.new_value)
        .fetch_one(db)
        .await?;

        Ok(row)
    }

    /// Most recent entries across all tasks, with actor usernames
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<HistoryView>, sqlx::Error> {
        let entries = sqlx::query_as::<_, HistoryView>(
            r#"
            SELECT h.id, h.task_id, COALESCE(u.username, '?') AS "user",
                   h.action, h.field, h.old_value, h.new_value, h.recorded_at
            FROM history h
            LEFT JOIN users u ON u.id = h.user_id
            ORDER BY h.recorded_at DESC, h.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Most recent entries for one task, with actor usernames
    ///
    /// Works for deleted tasks too; that is the point of the audit log.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HistoryView>, sqlx::Error> {
        let entries = sqlx::query_as::<_, HistoryView>(
            r#"
            SELECT h.id, h.task_id, COALESCE(u.username, '?') AS "user",
                   h.action, h.field, h.old_value, h.new_value, h.recorded_at
            FROM history h
            LEFT JOIN users u ON u.id = h.user_id
            WHERE h.task_id = $1
            ORDER BY h.recorded_at DESC, h.id ASC
            LIMIT $2
            "#,
        )
        .bind(task_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_as_str() {
        assert_eq!(HistoryAction::Created.as_str(), "created");
        assert_eq!(HistoryAction::Updated.as_str(), "updated");
        assert_eq!(HistoryAction::Deleted.as_str(), "deleted");
        assert_eq!(HistoryAction::Assigned.as_str(), "assigned");
    }

    #[test]
    fn test_action_serde() {
        assert_eq!(
            serde_json::to_string(&HistoryAction::Assigned).unwrap(),
            "\"assigned\""
        );
    }
}
