//! # Connection Provider
//!
//! Scoped connection acquisition over a lazily connecting PostgreSQL pool.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() ← host, database, user, password                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect_lazy(config) ← never fails, opens nothing yet       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │               PgPool                     │                           │
//! │  │  ┌─────┐ ┌─────┐                         │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ ...                     │                           │
//! │  │  └─────┘ └─────┘                         │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ each operation: begin() / acquire()                            │
//! │       ▼                                                                 │
//! │  guard dropped on every exit path → connection returned,               │
//! │  an uncommitted transaction rolled back                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unreachable server surfaces as a `DbError` from the first
//! `acquire`/`begin` of an operation, not from construction.

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::DbResult;
use crate::migrations;
use crate::repository::car_sale::CarSaleRepository;
use crate::repository::catalog::CatalogRepository;
use crate::repository::salesperson::SalespersonRepository;

/// Main database handle providing scoped connections and repository access.
///
/// Cloning is cheap; clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Builds the pool without opening a connection.
    ///
    /// ## What This Does
    /// 1. Turns the config into connect options
    /// 2. Sizes the pool (max/min connections, acquire and idle timeouts)
    /// 3. Returns immediately; connections open on first use
    pub fn connect_lazy(config: &DbConfig) -> Self {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "Configuring database pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_lazy_with(config.connect_options());

        Database { pool }
    }

    /// Builds the pool, proves the server is reachable, and runs migrations
    /// when the config asks for it.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection or migration failed
    pub async fn new(config: &DbConfig) -> DbResult<Self> {
        let db = Self::connect_lazy(config);

        // Fail fast on bad host or credentials
        drop(db.acquire().await?);
        info!("Database reachable");

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Acquires one connection; it returns to the pool when dropped.
    pub async fn acquire(&self) -> DbResult<PoolConnection<Postgres>> {
        debug!("Acquiring connection");
        Ok(self.pool.acquire().await?)
    }

    /// Starts a transaction on a freshly acquired connection.
    ///
    /// Dropping the returned transaction without `commit` rolls it back.
    pub async fn begin(&self) -> DbResult<Transaction<'static, Postgres>> {
        debug!("Beginning transaction");
        Ok(self.pool.begin().await?)
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For statements not covered by repositories (fixtures, diagnostics).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns the salesperson repository.
    pub fn salespeople(&self) -> SalespersonRepository {
        SalespersonRepository::new(self.clone())
    }

    /// Returns the catalog (make, model, customer) repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.clone())
    }

    /// Returns the car sale repository.
    pub fn car_sales(&self) -> CarSaleRepository {
        CarSaleRepository::new(self.clone())
    }

    /// Closes the pool; later operations fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, FailureKind};
    use std::time::Duration;

    /// Nothing listens on port 1 of the loopback interface.
    fn unreachable_config() -> DbConfig {
        DbConfig::new("127.0.0.1", "dealership", "nobody", "nothing")
            .port(1)
            .acquire_timeout(Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_connect_lazy_does_not_connect() {
        let db = Database::connect_lazy(&unreachable_config());
        assert_eq!(db.pool().size(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_failure() {
        let db = Database::connect_lazy(&unreachable_config());

        let err = db.acquire().await.err().expect("nothing listens on port 1");
        assert_eq!(err.kind(), FailureKind::Connection);
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_new_fails_fast_when_unreachable() {
        let result = Database::new(&unreachable_config()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_migration_status_reports_connection_failure() {
        let db = Database::connect_lazy(&unreachable_config());

        let err = migrations::migration_status(db.pool())
            .await
            .err()
            .expect("nothing listens on port 1");
        assert_eq!(err.kind(), FailureKind::Connection);
    }

    #[tokio::test]
    async fn test_closed_pool() {
        let db = Database::connect_lazy(&unreachable_config());
        db.close().await;

        assert!(matches!(db.begin().await.err(), Some(DbError::ConnectionFailed(_))));
    }
}
