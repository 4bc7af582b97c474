/// Database layer for Taskdeck
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: Embedded migration runner
/// - `seed`: One-time seeding of default users and projects
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::db::{migrations, pool::{create_pool, DatabaseConfig}, seed};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     migrations::run_migrations(&pool).await?;
///     seed::seed_if_empty(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
pub mod seed;
