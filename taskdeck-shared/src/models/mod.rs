/// Database models for Taskdeck
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and roles
/// - `project`: Named groupings of tasks
/// - `task`: The core work-item entity with status/priority/assignment
/// - `comment`: Immutable per-task comments
/// - `history`: Append-only audit records of task changes
/// - `notification`: Per-user messages about task events
///
/// # Referential integrity
///
/// Cross-table references are plain UUID columns without foreign keys. The
/// original system never enforced referential integrity at the store level
/// (deleting a project leaves its tasks in place), and history rows must
/// outlive the task they describe. User references are checked by the
/// service layer at write time instead.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{Task, CreateTask};
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
/// # Ok(())
/// # }
/// ```

pub mod comment;
pub mod history;
pub mod notification;
pub mod project;
pub mod task;
pub mod user;
