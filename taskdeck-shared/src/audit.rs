/// Audit recorder: history appends and notification fan-out
///
/// Every task mutation records what changed, and assignment/update events
/// notify the affected user. Both writes take a `&mut PgConnection` so the
/// caller can (and does) run them inside the same transaction as the
/// mutation itself: they complete before the HTTP response is sent, and a
/// failure aborts the whole request instead of being dropped. There is no
/// background queue.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::audit;
/// use taskdeck_shared::models::task::{Task, CreateTask};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, actor: Uuid) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
/// let task = Task::create(&mut *tx, CreateTask {
///     title: "Fix bug".to_string(),
///     created_by: actor,
///     ..Default::default()
/// }).await?;
/// audit::record_created(&mut tx, &task, actor).await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::history::{HistoryAction, HistoryEntry, NewHistoryEntry};
use crate::models::notification::{Notification, NotificationKind};
use crate::models::task::{FieldChange, Task};

/// Appends one history entry
pub async fn record(
    conn: &mut PgConnection,
    entry: NewHistoryEntry,
) -> Result<HistoryEntry, sqlx::Error> {
    HistoryEntry::append(&mut *conn, entry).await
}

/// Appends one notification for `recipient`
pub async fn notify(
    conn: &mut PgConnection,
    recipient: Uuid,
    kind: NotificationKind,
    message: String,
) -> Result<Notification, sqlx::Error> {
    Notification::create(&mut *conn, recipient, kind, message).await
}

/// Records the creation of a task
///
/// One `created` entry with the title as the new value, before any
/// `updated` entry can exist for the task id.
pub async fn record_created(
    conn: &mut PgConnection,
    task: &Task,
    actor: Uuid,
) -> Result<HistoryEntry, sqlx::Error> {
    record(
        conn,
        NewHistoryEntry {
            task_id: task.id,
            user_id: actor,
            action: HistoryAction::Created,
            field: None,
            old_value: String::new(),
            new_value: task.title.clone(),
        },
    )
    .await
}

/// Records a field-level diff, one entry per changed field
///
/// Assignment changes get the `assigned` action; everything else is
/// `updated`. Old/new renderings come from [`Task::diff`].
pub async fn record_changes(
    conn: &mut PgConnection,
    task_id: Uuid,
    actor: Uuid,
    changes: &[FieldChange],
) -> Result<(), sqlx::Error> {
    for change in changes {
        let action = if change.is_assignment() {
            HistoryAction::Assigned
        } else {
            HistoryAction::Updated
        };
        record(
            conn,
            NewHistoryEntry {
                task_id,
                user_id: actor,
                action,
                field: Some(change.field.to_string()),
                old_value: change.old.clone(),
                new_value: change.new.clone(),
            },
        )
        .await?;
    }
    Ok(())
}

/// Records the deletion of a task
///
/// The entry references the removed task id; history outlives the task.
pub async fn record_deleted(
    conn: &mut PgConnection,
    task: &Task,
    actor: Uuid,
) -> Result<HistoryEntry, sqlx::Error> {
    record(
        conn,
        NewHistoryEntry {
            task_id: task.id,
            user_id: actor,
            action: HistoryAction::Deleted,
            field: None,
            old_value: task.title.clone(),
            new_value: String::new(),
        },
    )
    .await
}
