/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with
/// all routes and middleware.
///
/// # Router layout
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// └── /v1/                          # API v1
///     ├── /auth/login               # POST, public
///     ├── /auth/refresh             # POST, public
///     ├── /auth/me                  # GET, authenticated
///     ├── /users[/:id]              # listing + admin management
///     ├── /projects[/:id]           # project CRUD
///     ├── /tasks[/:id]              # task CRUD
///     ├── /tasks/:id/comments       # comments panel
///     ├── /history[/:task_id]       # audit log panel
///     ├── /notifications[/read]     # notifications panel
///     ├── /search                   # text/status/priority/project search
///     ├── /reports/:kind            # report lines
///     ├── /export/csv               # CSV download
///     └── /stats                    # dashboard aggregates
/// ```
///
/// # Middleware stack
///
/// Applied outside-in: security headers, CORS, request tracing; the
/// authentication layer wraps every route except /health and login/refresh.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::{AppState, build_router}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::auth::{jwt, middleware as auth_mw};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via axum's `State` extractor; the pool
/// and config are cheap to clone (Arc/pool handles).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session token signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public authentication endpoints; /me carries its own auth layer.
    let auth_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .route(
            "/me",
            get(routes::auth::me).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                session_auth_layer,
            )),
        );

    // Everything else requires a valid session.
    let api_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            put(routes::users::update_user).delete(routes::users::delete_user),
        )
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/projects/:id",
            put(routes::projects::update_project).delete(routes::projects::delete_project),
        )
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route(
            "/tasks/:id/comments",
            get(routes::comments::list_comments).post(routes::comments::add_comment),
        )
        .route("/history", get(routes::history::recent_history))
        .route("/history/:task_id", get(routes::history::task_history))
        .route("/notifications", get(routes::notifications::list_unread))
        .route("/notifications/read", post(routes::notifications::mark_all_read))
        .route("/search", get(routes::search::search_tasks))
        .route("/reports/:kind", get(routes::reports::report))
        .route("/export/csv", get(routes::export::export_csv))
        .route("/stats", get(routes::stats::stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(api_routes);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            crate::middleware::security_headers,
        ))
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Validates the Bearer token from the Authorization header and injects
/// an [`auth_mw::AuthContext`] into request extensions.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let token = auth_mw::bearer_token(req.headers())?;

    let claims = jwt::validate_access_token(token, state.session_secret())?;

    req.extensions_mut()
        .insert(auth_mw::AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
