/// Comment model and database operations
///
/// Comments are immutable once written; there is no update or delete path.
/// Comments on a deleted task are retained as orphans.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL,
///     user_id UUID NOT NULL,
///     body TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Comment author
    pub user_id: Uuid,

    /// Comment text
    pub body: String,

    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's username, for the comments panel
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentView {
    pub id: Uuid,

    /// Author username ("?" if the user was deleted)
    pub user: String,

    #[serde(rename = "text")]
    pub body: String,

    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment
    ///
    /// The caller checks that the task and author exist first (no foreign
    /// keys at the store level).
    pub async fn create<'e>(
        db: impl PgExecutor<'e>,
        task_id: Uuid,
        user_id: Uuid,
        body: String,
    ) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (task_id, user_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, user_id, body, created_at
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments with author usernames, oldest first
    pub async fn list_for_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<CommentView>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.id, COALESCE(u.username, '?') AS "user", c.body, c.created_at
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.task_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }
}
