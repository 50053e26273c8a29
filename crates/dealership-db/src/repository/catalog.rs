//! # Catalog Repository
//!
//! Makes, models and customers: the reference records a car sale points at.
//!
//! ## Name Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Resolving Typed Names                                │
//! │                                                                         │
//! │  "toyota", "COROLLA"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_make: LOWER(make_name) = LOWER($1)     → Make { code: "TOY" }    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_model: make_code = 'TOY'                                         │
//! │              AND LOWER(model_name) = LOWER($2) → Model { code: "COR" } │
//! │       │                                                                 │
//! │       └── a model of the same name under another make never matches    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions run on a caller-supplied connection so the car sale
//! repository can resolve names inside its own transaction.

use sqlx::PgConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use dealership_core::{Customer, Make, Model};

// =============================================================================
// Connection-Level Lookups
// =============================================================================

/// Looks up a make by name, ignoring case.
pub async fn find_make(conn: &mut PgConnection, name: &str) -> DbResult<Option<Make>> {
    let make = sqlx::query_as::<_, Make>(
        r#"
        SELECT make_code, make_name
        FROM make
        WHERE LOWER(make_name) = LOWER($1)
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;

    Ok(make)
}

/// Looks up a model by name under one make, ignoring case.
///
/// ## Errors
/// * `Ambiguous` - More than one model of this name under the make
pub async fn find_model(
    conn: &mut PgConnection,
    make_code: &str,
    name: &str,
) -> DbResult<Option<Model>> {
    // Two rows are enough to tell "unique" from "ambiguous"
    let mut models = sqlx::query_as::<_, Model>(
        r#"
        SELECT model_code, model_name, make_code
        FROM model
        WHERE make_code = $1
          AND LOWER(model_name) = LOWER($2)
        ORDER BY model_code
        LIMIT 2
        "#,
    )
    .bind(make_code)
    .bind(name)
    .fetch_all(conn)
    .await?;

    if models.len() > 1 {
        return Err(DbError::Ambiguous {
            entity: "Model".to_string(),
            name: name.to_string(),
            matches: models.len(),
        });
    }

    Ok(models.pop())
}

/// Looks up a customer by identifier, ignoring case.
pub async fn find_customer(
    conn: &mut PgConnection,
    customer_id: &str,
) -> DbResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        SELECT customer_id, first_name, last_name
        FROM customer
        WHERE LOWER(customer_id) = LOWER($1)
        "#,
    )
    .bind(customer_id)
    .fetch_optional(conn)
    .await?;

    Ok(customer)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for make, model and customer records.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: Database,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(db: Database) -> Self {
        CatalogRepository { db }
    }

    /// Gets a make by name (case-insensitive).
    pub async fn find_make(&self, name: &str) -> DbResult<Option<Make>> {
        let mut conn = self.db.acquire().await?;
        find_make(&mut conn, name).await
    }

    /// Gets a model by make name and model name (both case-insensitive).
    ///
    /// `Ok(None)` when either the make or the model under it is missing.
    pub async fn find_model(&self, make_name: &str, model_name: &str) -> DbResult<Option<Model>> {
        let mut conn = self.db.acquire().await?;

        let Some(make) = find_make(&mut conn, make_name).await? else {
            return Ok(None);
        };

        find_model(&mut conn, &make.make_code, model_name).await
    }

    /// Gets a customer by identifier (case-insensitive).
    pub async fn find_customer(&self, customer_id: &str) -> DbResult<Option<Customer>> {
        let mut conn = self.db.acquire().await?;
        find_customer(&mut conn, customer_id).await
    }

    /// Inserts a make.
    ///
    /// ## Errors
    /// * `UniqueViolation` - Code taken, or name taken ignoring case
    pub async fn insert_make(&self, make: &Make) -> DbResult<()> {
        debug!(make_code = %make.make_code, make_name = %make.make_name, "Inserting make");

        sqlx::query("INSERT INTO make (make_code, make_name) VALUES ($1, $2)")
            .bind(&make.make_code)
            .bind(&make.make_name)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    /// Inserts a model under an existing make.
    ///
    /// ## Errors
    /// * `ForeignKeyViolation` - Unknown make code
    /// * `UniqueViolation` - Name already used under this make (ignoring case)
    pub async fn insert_model(&self, model: &Model) -> DbResult<()> {
        debug!(
            model_code = %model.model_code,
            model_name = %model.model_name,
            make_code = %model.make_code,
            "Inserting model"
        );

        sqlx::query("INSERT INTO model (model_code, model_name, make_code) VALUES ($1, $2, $3)")
            .bind(&model.model_code)
            .bind(&model.model_name)
            .bind(&model.make_code)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    /// Inserts a customer.
    pub async fn insert_customer(&self, customer: &Customer) -> DbResult<()> {
        debug!(customer_id = %customer.customer_id, "Inserting customer");

        sqlx::query(
            "INSERT INTO customer (customer_id, first_name, last_name) VALUES ($1, $2, $3)",
        )
        .bind(&customer.customer_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Counts makes; the seed tool uses it to detect an already-seeded database.
    pub async fn count_makes(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM make")
            .fetch_one(self.db.pool())
            .await?;

        Ok(count)
    }
}
