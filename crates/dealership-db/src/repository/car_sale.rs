//! # Car Sale Repository
//!
//! Summary, search, and the two writes that move a car through its lifecycle.
//!
//! ## Car Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Car Sale Lifecycle                                │
//! │                                                                         │
//! │  1. RECORD                                                             │
//! │     └── record() → resolve make, resolve model under it,               │
//! │                    INSERT (is_sold = FALSE)          one transaction   │
//! │                                                                         │
//! │  2. COMPLETE                                                           │
//! │     └── complete() → resolve customer, resolve salesperson,            │
//! │                      single UPDATE of buyer, salesperson, date, flag   │
//! │                                                       one transaction  │
//! │                                                                         │
//! │  3. REPORT                                                             │
//! │     ├── summary() → one row per (make, model), zero counts included    │
//! │     └── search()  → unsold cars + sales of the last three years        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices live in a `NUMERIC(12,2)` column and cross the wire as integer
//! cents (`price * 100` on the way out, `cents / 100` on the way in).

use chrono::NaiveDate;
use sqlx::PgConnection;
use tracing::debug;

use super::catalog::{find_customer, find_make, find_model};
use super::finish_transaction;
use super::salesperson::find_salesperson;
use crate::error::{DbError, DbResult};
use crate::pool::Database;
use dealership_core::report::search_cutoff;
use dealership_core::validation::{NewCarSale, SaleCompletion};
use dealership_core::{CarSale, CarSaleSearchRecord, CarSaleSummaryRecord, CoreError};

/// Repository for car sale database operations.
#[derive(Debug, Clone)]
pub struct CarSaleRepository {
    db: Database,
}

impl CarSaleRepository {
    /// Creates a new CarSaleRepository.
    pub fn new(db: Database) -> Self {
        CarSaleRepository { db }
    }

    /// Gets a car sale by ID.
    pub async fn get_by_id(&self, car_sale_id: i32) -> DbResult<Option<CarSale>> {
        let sale = sqlx::query_as::<_, CarSale>(
            r#"
            SELECT
                car_sale_id,
                make_code,
                model_code,
                built_year,
                odometer,
                (price * 100)::BIGINT AS price_cents,
                is_sold,
                sale_date,
                buyer_id,
                salesperson_id
            FROM car_sale
            WHERE car_sale_id = $1
            "#,
        )
        .bind(car_sale_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(sale)
    }

    /// Per (make, model) counts and revenue.
    ///
    /// ## Aggregation
    /// ```text
    /// model ⋈ make ⟕ car_sale          (left join keeps models with no sales)
    ///   available_units = count where is_sold = FALSE
    ///   sold_units      = count where is_sold = TRUE
    ///   revenue         = sum(price) where sold, 0 when none
    ///   last purchased  = max(sale_date) where sold, NULL when none
    /// ```
    ///
    /// Ordered by make name, then model name, comparing stored text byte-wise.
    pub async fn summary(&self) -> DbResult<Vec<CarSaleSummaryRecord>> {
        let mut conn = self.db.acquire().await?;

        let rows = sqlx::query_as::<_, CarSaleSummaryRecord>(
            r#"
            SELECT
                mk.make_name,
                mo.model_name,
                COUNT(cs.car_sale_id) FILTER (WHERE cs.is_sold = FALSE) AS available_units,
                COUNT(cs.car_sale_id) FILTER (WHERE cs.is_sold = TRUE) AS sold_units,
                (COALESCE(SUM(cs.price) FILTER (WHERE cs.is_sold = TRUE), 0) * 100)::BIGINT
                    AS sold_total_cents,
                MAX(cs.sale_date) FILTER (WHERE cs.is_sold = TRUE) AS last_purchased_at
            FROM model mo
            JOIN make mk ON mk.make_code = mo.make_code
            LEFT JOIN car_sale cs
                ON cs.make_code = mo.make_code
               AND cs.model_code = mo.model_code
            GROUP BY mk.make_code, mk.make_name, mo.model_code, mo.model_name
            ORDER BY mk.make_name COLLATE "C", mo.model_name COLLATE "C", mo.model_code
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        debug!(rows = rows.len(), "Summary computed");
        Ok(rows)
    }

    /// Free-text search over make, model, buyer and salesperson names.
    ///
    /// ## Matching
    /// - Substring match, ignoring case, on any of the four names
    /// - Empty text matches every row
    /// - `%` and `_` are plain characters (no LIKE pattern is built)
    ///
    /// ## Window
    /// Unsold cars always; sold cars only when `sale_date` is on or after
    /// [`search_cutoff`]`(today)`.
    ///
    /// ## Order
    /// Unsold first, then by sale date ascending, then make, model and id.
    pub async fn search(&self, text: &str, today: NaiveDate) -> DbResult<Vec<CarSaleSearchRecord>> {
        let cutoff = search_cutoff(today);
        let mut conn = self.db.acquire().await?;

        let rows = sqlx::query_as::<_, CarSaleSearchRecord>(
            r#"
            SELECT
                cs.car_sale_id,
                mk.make_name,
                mo.model_name,
                cs.built_year,
                cs.odometer,
                (cs.price * 100)::BIGINT AS price_cents,
                cs.is_sold,
                cs.sale_date,
                cu.first_name || ' ' || cu.last_name AS buyer_name,
                sp.first_name || ' ' || sp.last_name AS salesperson_name
            FROM car_sale cs
            JOIN make mk ON mk.make_code = cs.make_code
            JOIN model mo ON mo.model_code = cs.model_code
            LEFT JOIN customer cu ON cu.customer_id = cs.buyer_id
            LEFT JOIN salesperson sp ON sp.username = cs.salesperson_id
            WHERE (cs.is_sold = FALSE OR cs.sale_date >= $2)
              AND (
                    STRPOS(LOWER(mk.make_name), LOWER($1)) > 0
                 OR STRPOS(LOWER(mo.model_name), LOWER($1)) > 0
                 OR STRPOS(LOWER(cu.first_name || ' ' || cu.last_name), LOWER($1)) > 0
                 OR STRPOS(LOWER(sp.first_name || ' ' || sp.last_name), LOWER($1)) > 0
              )
            ORDER BY
                cs.is_sold,
                cs.sale_date NULLS FIRST,
                mk.make_name COLLATE "C",
                mo.model_name COLLATE "C",
                cs.car_sale_id
            "#,
        )
        .bind(text)
        .bind(cutoff)
        .fetch_all(&mut *conn)
        .await?;

        debug!(text = %text, cutoff = %cutoff, rows = rows.len(), "Search complete");
        Ok(rows)
    }

    /// Puts a car on the lot.
    ///
    /// ## Steps (one transaction)
    /// 1. Resolve the make by name (case-insensitive)
    /// 2. Resolve the model by name under that make
    /// 3. INSERT with the canonical codes, `is_sold = FALSE`
    ///
    /// ## Returns
    /// The new `car_sale_id`.
    ///
    /// ## Errors
    /// * `Rejected(MakeNotFound)` / `Rejected(ModelNotFound)` - Nothing written
    /// * `Ambiguous` - Several models of that name under the make
    pub async fn record(&self, sale: &NewCarSale) -> DbResult<i32> {
        let mut tx = self.db.begin().await?;
        let result = record_in(&mut tx, sale).await;
        finish_transaction(tx, result).await
    }

    /// Marks an existing car as sold.
    ///
    /// ## Steps (one transaction)
    /// 1. Resolve the customer by identifier (case-insensitive)
    /// 2. Resolve the salesperson by username (case-insensitive)
    /// 3. One UPDATE setting buyer, salesperson, date and `is_sold = TRUE`
    ///    using the canonical identifiers from steps 1 and 2
    ///
    /// Completing an already-sold car overwrites the earlier sale details.
    ///
    /// ## Errors
    /// * `Rejected(CustomerNotFound)` / `Rejected(SalespersonNotFound)`
    /// * `Rejected(CarSaleNotFound)` - No car with this id; nothing written
    pub async fn complete(&self, completion: &SaleCompletion) -> DbResult<()> {
        let mut tx = self.db.begin().await?;
        let result = complete_in(&mut tx, completion).await;
        finish_transaction(tx, result).await
    }
}

async fn record_in(conn: &mut PgConnection, sale: &NewCarSale) -> DbResult<i32> {
    let make = find_make(conn, &sale.make)
        .await?
        .ok_or_else(|| CoreError::MakeNotFound(sale.make.clone()))?;

    let model = find_model(conn, &make.make_code, &sale.model)
        .await?
        .ok_or_else(|| CoreError::ModelNotFound {
            make: make.make_name.clone(),
            model: sale.model.clone(),
        })?;

    debug!(
        make_code = %make.make_code,
        model_code = %model.model_code,
        price = %sale.price,
        "Inserting car sale"
    );

    let car_sale_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO car_sale (make_code, model_code, built_year, odometer, price, is_sold)
        VALUES ($1, $2, $3, $4, $5::BIGINT::NUMERIC / 100, FALSE)
        RETURNING car_sale_id
        "#,
    )
    .bind(&make.make_code)
    .bind(&model.model_code)
    .bind(sale.built_year)
    .bind(sale.odometer)
    .bind(sale.price.cents())
    .fetch_one(conn)
    .await?;

    Ok(car_sale_id)
}

async fn complete_in(conn: &mut PgConnection, completion: &SaleCompletion) -> DbResult<()> {
    let customer = find_customer(conn, &completion.customer_id)
        .await?
        .ok_or_else(|| CoreError::CustomerNotFound(completion.customer_id.clone()))?;

    let salesperson = find_salesperson(conn, &completion.salesperson_username)
        .await?
        .ok_or_else(|| CoreError::SalespersonNotFound(completion.salesperson_username.clone()))?;

    debug!(
        car_sale_id = completion.car_sale_id,
        customer_id = %customer.customer_id,
        salesperson = %salesperson.username,
        sale_date = %completion.sale_date,
        "Completing car sale"
    );

    let result = sqlx::query(
        r#"
        UPDATE car_sale
        SET buyer_id = $2,
            salesperson_id = $3,
            sale_date = $4,
            is_sold = TRUE
        WHERE car_sale_id = $1
        "#,
    )
    .bind(completion.car_sale_id)
    .bind(&customer.customer_id)
    .bind(&salesperson.username)
    .bind(completion.sale_date)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::from(CoreError::CarSaleNotFound(completion.car_sale_id)));
    }

    Ok(())
}
