/// User listing and management endpoints
///
/// Listing is open to any authenticated user (the dashboard needs
/// usernames for its assignment picker). Creating, deleting, and editing
/// other accounts requires the admin role; a regular user may only change
/// their own password.
///
/// # Endpoints
///
/// - `GET    /v1/users` - List users (no password hashes)
/// - `POST   /v1/users` - Admin: create user
/// - `PUT    /v1/users/:id` - Admin: change role/password; self: change password
/// - `DELETE /v1/users/:id` - Admin: remove user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{middleware::AuthContext, password, policy},
    models::user::{CreateUser, User, UserRole},
};
use uuid::Uuid;
use validator::Validate;

/// Public view of a user; never exposes the password hash
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Create user request (admin only)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub password: String,

    /// Defaults to the regular user role
    pub role: Option<UserRole>,
}

/// Update user request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub password: Option<String>,

    /// Role changes require the admin role
    pub role: Option<UserRole>,
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserInfo>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// Creates a user (admin only)
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not an admin
/// - `409 Conflict`: Username already exists
pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserInfo>> {
    policy::require_admin(auth.role)?;
    req.validate().map_err(ApiError::from_validation)?;

    let username = req.username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::validation("username", "Username is required"));
    }

    let user = User::create(
        &state.db,
        CreateUser {
            username,
            password_hash: password::hash_password(&req.password)?,
            role: req.role.unwrap_or(UserRole::User),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok(Json(user.into()))
}

/// Updates a user's password and/or role
///
/// Admins may edit anyone. A regular user may change only their own
/// password; touching someone else's account or any role is forbidden.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserInfo>> {
    req.validate().map_err(ApiError::from_validation)?;

    if !auth.is_admin() && (id != auth.user_id || req.role.is_some()) {
        return Err(ApiError::Forbidden(
            "Only admins may edit other accounts or roles".to_string(),
        ));
    }

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Some(ref new_password) = req.password {
        User::update_password(&state.db, user.id, &password::hash_password(new_password)?).await?;
    }

    if let Some(role) = req.role {
        User::update_role(&state.db, user.id, role).await?;
    }

    let updated = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %updated.id, "User updated");

    Ok(Json(updated.into()))
}

/// Deletes a user (admin only)
///
/// Tasks, comments, and history rows that reference the user keep their
/// ids; joins render the missing username as "?".
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    policy::require_admin(auth.role)?;

    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(serde_json::json!({ "deleted": id })))
}
