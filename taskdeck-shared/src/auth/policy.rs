/// Task permission policy
///
/// A user may modify (edit or delete) a task iff they are an admin, the
/// task's creator, or its assignee. The decision is an explicit enumerated
/// function rather than conditionals scattered through handlers: the grant
/// says *why* access was allowed, and `None` means denied. Pure; no I/O.
///
/// Viewing is not restricted by this policy: any authenticated user can
/// read tasks, search, and reports.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::policy::{decide_modify, ModifyGrant};
/// use taskdeck_shared::models::user::UserRole;
/// # use taskdeck_shared::models::task::Task;
/// # use uuid::Uuid;
///
/// # fn example(task: &Task) {
/// let grant = decide_modify(task.created_by, UserRole::User, task);
/// assert_eq!(grant, Some(ModifyGrant::Creator));
/// # }
/// ```

use uuid::Uuid;

use crate::models::task::Task;
use crate::models::user::UserRole;

/// Why a modification was allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyGrant {
    /// Caller is an admin
    AdminOverride,

    /// Caller created the task
    Creator,

    /// Caller is the task's assignee
    Assignee,
}

/// Error type for policy denials
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Caller is neither admin, creator, nor assignee
    #[error("Not allowed to modify this task")]
    Denied,

    /// Operation requires the admin role
    #[error("Admin role required")]
    AdminRequired,
}

/// Decides whether `user_id` with `role` may modify `task`
///
/// Checked in a fixed order so the returned grant is deterministic:
/// admin, then creator, then assignee.
pub fn decide_modify(user_id: Uuid, role: UserRole, task: &Task) -> Option<ModifyGrant> {
    if role.is_admin() {
        return Some(ModifyGrant::AdminOverride);
    }
    if task.created_by == user_id {
        return Some(ModifyGrant::Creator);
    }
    if task.assigned_to == Some(user_id) {
        return Some(ModifyGrant::Assignee);
    }
    None
}

/// Like [`decide_modify`], but a denial is an error
///
/// Handlers call this before every task update/delete; the error maps to
/// a 403 response, never a silent no-op.
pub fn require_modify(user_id: Uuid, role: UserRole, task: &Task) -> Result<ModifyGrant, PolicyError> {
    decide_modify(user_id, role, task).ok_or(PolicyError::Denied)
}

/// Requires the admin role (user management endpoints)
pub fn require_admin(role: UserRole) -> Result<(), PolicyError> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(PolicyError::AdminRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::Utc;

    fn task_with(created_by: Uuid, assigned_to: Option<Uuid>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            project_id: None,
            assigned_to,
            created_by,
            due_date: None,
            estimated_hours: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_can_modify_anything() {
        let task = task_with(Uuid::new_v4(), Some(Uuid::new_v4()));
        let stranger = Uuid::new_v4();

        assert_eq!(
            decide_modify(stranger, UserRole::Admin, &task),
            Some(ModifyGrant::AdminOverride)
        );
    }

    #[test]
    fn test_creator_can_modify() {
        let creator = Uuid::new_v4();
        let task = task_with(creator, None);

        assert_eq!(
            decide_modify(creator, UserRole::User, &task),
            Some(ModifyGrant::Creator)
        );
    }

    #[test]
    fn test_assignee_can_modify() {
        let assignee = Uuid::new_v4();
        let task = task_with(Uuid::new_v4(), Some(assignee));

        assert_eq!(
            decide_modify(assignee, UserRole::User, &task),
            Some(ModifyGrant::Assignee)
        );
    }

    #[test]
    fn test_everyone_else_denied() {
        let task = task_with(Uuid::new_v4(), Some(Uuid::new_v4()));
        let stranger = Uuid::new_v4();

        assert_eq!(decide_modify(stranger, UserRole::User, &task), None);
        assert!(matches!(
            require_modify(stranger, UserRole::User, &task),
            Err(PolicyError::Denied)
        ));
    }

    #[test]
    fn test_unassigned_task_denies_non_creator() {
        // A task with no assignee must not accidentally match anyone.
        let task = task_with(Uuid::new_v4(), None);
        let stranger = Uuid::new_v4();

        assert_eq!(decide_modify(stranger, UserRole::User, &task), None);
    }

    #[test]
    fn test_admin_grant_wins_over_creator() {
        let creator = Uuid::new_v4();
        let task = task_with(creator, Some(creator));

        assert_eq!(
            decide_modify(creator, UserRole::Admin, &task),
            Some(ModifyGrant::AdminOverride)
        );
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(UserRole::Admin).is_ok());
        assert!(matches!(
            require_admin(UserRole::User),
            Err(PolicyError::AdminRequired)
        ));
    }
}
