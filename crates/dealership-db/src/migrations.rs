//! # Database Migrations
//!
//! Embedded SQL migrations for the dealership schema.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  seed binary / deployment step                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (first schema on search_path)            │
//! │       │                                                                 │
//! │       ├── Table doesn't exist? Create it                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order                                       │
//! │       ├── 0001_initial_schema.sql  (make, model, customer,             │
//! │       │                             salesperson, car_sale)             │
//! │       └── 0002_car_sale_model_make_fk.sql  (model belongs to make)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/postgres/` with the next sequence number
//! 2. Name format: `NNNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::PgPool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/postgres` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/postgres");

/// Runs all pending database migrations.
///
/// Idempotent: applied migrations are recorded and skipped.
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// SQLSTATE for a relation that does not exist.
const UNDEFINED_TABLE: &str = "42P01";

/// Returns (total_migrations, applied_migrations), for diagnostics.
///
/// A schema that has never been migrated has no `_sqlx_migrations` table and
/// reports zero applied; every other failure is returned.
pub async fn migration_status(pool: &PgPool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = match sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count,
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(UNDEFINED_TABLE) =>
        {
            0
        }
        Err(err) => return Err(err.into()),
    };

    Ok((total, applied as usize))
}
