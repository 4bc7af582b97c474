/// Notification model
///
/// Notifications are written by the audit recorder when a task is assigned
/// or updated, and mutated only by marking them read. Notifications about
/// a deleted task are retained.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notifications (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL,
///     kind VARCHAR(32) NOT NULL,
///     message TEXT NOT NULL,
///     read BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Notification event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to the recipient
    TaskAssigned,

    /// A task assigned to the recipient was updated
    TaskUpdated,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::TaskAssigned => "task_assigned",
            NotificationKind::TaskUpdated => "task_updated",
        }
    }
}

/// Notification model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,

    /// Recipient
    pub user_id: Uuid,

    /// Event kind ("task_assigned", "task_updated")
    pub kind: String,

    /// Human-readable message
    pub message: String,

    /// Whether the recipient has seen it
    pub read: bool,

    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification
    ///
    /// Runs on the caller's executor so it can share the transaction of
    /// the mutation that triggered it.
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        user_id: Uuid,
        kind: NotificationKind,
        message: String,
    ) -> Result<Self, sqlx::Error> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, kind, message)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, kind, message, read, created_at
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(message)
        .fetch_one(db)
        .await?;

        Ok(notification)
    }

    /// Lists a user's unread notifications, newest first
    pub async fn list_unread(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, kind, message, read, created_at
            FROM notifications
            WHERE user_id = $1 AND read = FALSE
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }

    /// Marks all of a user's notifications read
    ///
    /// Returns the number of rows updated.
    pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(NotificationKind::TaskAssigned.as_str(), "task_assigned");
        assert_eq!(NotificationKind::TaskUpdated.as_str(), "task_updated");
    }
}
