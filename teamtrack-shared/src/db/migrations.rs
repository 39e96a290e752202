/// Database migration runner
///
/// Migrations live in the crate's `migrations/` directory and are embedded
/// at compile time with `sqlx::migrate!`. The schema deliberately declares
/// no foreign keys and no unique index on `users.email` — both referential
/// integrity and email uniqueness are enforced in the application layer.
///
/// # Example
///
/// ```no_run
/// use teamtrack_shared::db::pool::{create_pool, DatabaseConfig};
/// use teamtrack_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::info;

/// Runs all pending migrations against the given pool
///
/// Safe to call on every startup; already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrated successfully");
    Ok(())
}
