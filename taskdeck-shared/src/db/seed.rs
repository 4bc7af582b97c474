/// One-time seeding of default users and projects
///
/// Runs at startup after migrations: if the `users` table is empty, three
/// default accounts are created (admin/user1/user2, password = username);
/// if `projects` is empty, three demo projects. An already-populated table
/// is left untouched, so this is an explicit, idempotent initialization
/// routine rather than ambient "create on first access" state.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::models::project::{CreateProject, Project};
use crate::models::user::{CreateUser, User, UserRole};

/// Default accounts created on an empty database
const DEFAULT_USERS: [(&str, UserRole); 3] = [
    ("admin", UserRole::Admin),
    ("user1", UserRole::User),
    ("user2", UserRole::User),
];

/// Default projects created on an empty database
const DEFAULT_PROJECTS: [(&str, &str); 3] = [
    ("Demo Project", "Sample project"),
    ("Alpha Project", "Main project"),
    ("Beta Project", "Secondary project"),
];

/// Seeds default users and projects if their tables are empty
///
/// # Errors
///
/// Returns an error if hashing or any insert fails; a partial seed is not
/// rolled back (rerunning at next startup skips non-empty tables).
pub async fn seed_if_empty(pool: &PgPool) -> anyhow::Result<()> {
    let mut admin_id: Option<Uuid> = None;

    if User::count(pool).await? == 0 {
        warn!("Seeding default users with password = username; change these in production");
        for (username, role) in DEFAULT_USERS {
            let user = User::create(
                pool,
                CreateUser {
                    username: username.to_string(),
                    password_hash: hash_password(username)?,
                    role,
                },
            )
            .await?;
            if role.is_admin() {
                admin_id = Some(user.id);
            }
            info!(username, role = role.as_str(), "Seeded user");
        }
    }

    if Project::count(pool).await? == 0 {
        for (name, description) in DEFAULT_PROJECTS {
            Project::create(
                pool,
                CreateProject {
                    name: name.to_string(),
                    description: description.to_string(),
                    created_by: admin_id,
                },
            )
            .await?;
            info!(name, "Seeded project");
        }
    }

    Ok(())
}
