//! # DataAccess Facade
//!
//! The five operations the calling layer uses, taking plain text in and
//! handing plain values back.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Operation                                    │
//! │                                                                         │
//! │  add_car_sale("Toyota", "Corolla", "2020", "15000", "18500.555")       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  try_add_car_sale                                                      │
//! │  ├── NewCarSale::parse(.., today)  ← bad input stops here, no DB I/O   │
//! │  ├── db.car_sales().record(..)     ← own connection, own transaction   │
//! │  └── Ok(car_sale_id) / Err(DbError)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Err? → warn!(operation, kind, error) → false                          │
//! │  Ok?  → true                                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Surfaces
//!
//! | Collapsing (calling layer)  | Typed (`try_`)                 |
//! |-----------------------------|--------------------------------|
//! | `authenticate` → `Option`   | `DbResult<Option<_>>`          |
//! | `car_sales_summary` → `Vec` | `DbResult<Vec<_>>`             |
//! | `find_car_sales` → `Vec`    | `DbResult<Vec<_>>`             |
//! | `add_car_sale` → `bool`     | `DbResult<i32>` (new id)       |
//! | `update_car_sale` → `bool`  | `DbResult<()>`                 |
//!
//! The collapsing methods never return an error; every failure is logged
//! with its [`FailureKind`](crate::FailureKind) and becomes `None`, an empty
//! list or `false`.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::pool::Database;
use dealership_core::report::{CarSaleListing, CarSaleSummary};
use dealership_core::validation::{normalize_search_text, NewCarSale, SaleCompletion};
use dealership_core::AuthenticatedSalesperson;

/// Today's date on the local calendar.
fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Entry point for the calling layer.
///
/// Holds no connection between calls; each operation acquires its own.
#[derive(Debug, Clone)]
pub struct DataAccess {
    db: Database,
    clock: fn() -> NaiveDate,
}

impl DataAccess {
    /// Wraps an existing database handle.
    pub fn new(db: Database) -> Self {
        DataAccess {
            db,
            clock: local_today,
        }
    }

    /// Builds a lazily connecting handle from configuration.
    ///
    /// Never fails; an unreachable server shows up in the first operation.
    pub fn connect_lazy(config: &DbConfig) -> Self {
        Self::new(Database::connect_lazy(config))
    }

    /// Replaces the source of "today" used by date rules.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    // =========================================================================
    // Typed Operations
    // =========================================================================

    /// Checks a username/password pair.
    pub async fn try_authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<AuthenticatedSalesperson>> {
        self.db.salespeople().authenticate(username, password).await
    }

    /// One rendered row per (make, model).
    pub async fn try_car_sales_summary(&self) -> DbResult<Vec<CarSaleSummary>> {
        let records = self.db.car_sales().summary().await?;
        Ok(records.into_iter().map(CarSaleSummary::from).collect())
    }

    /// Rendered rows matching `search_text` within the search window.
    pub async fn try_find_car_sales(&self, search_text: &str) -> DbResult<Vec<CarSaleListing>> {
        let text = normalize_search_text(search_text);
        let records = self.db.car_sales().search(&text, self.today()).await?;
        Ok(records.into_iter().map(CarSaleListing::from).collect())
    }

    /// Validates and records a new car; returns its id.
    pub async fn try_add_car_sale(
        &self,
        make: &str,
        model: &str,
        built_year: &str,
        odometer: &str,
        price: &str,
    ) -> DbResult<i32> {
        let sale = NewCarSale::parse(make, model, built_year, odometer, price, self.today())?;
        let car_sale_id = self.db.car_sales().record(&sale).await?;

        info!(
            car_sale_id,
            make = %sale.make,
            model = %sale.model,
            price = %sale.price,
            "Car sale recorded"
        );
        Ok(car_sale_id)
    }

    /// Validates and completes the sale of an existing car.
    pub async fn try_update_car_sale(
        &self,
        car_sale_id: &str,
        customer_id: &str,
        salesperson_username: &str,
        sale_date: &str,
    ) -> DbResult<()> {
        let completion = SaleCompletion::parse(
            car_sale_id,
            customer_id,
            salesperson_username,
            sale_date,
            self.today(),
        )?;
        self.db.car_sales().complete(&completion).await?;

        info!(
            car_sale_id = completion.car_sale_id,
            sale_date = %completion.sale_date,
            "Car sale completed"
        );
        Ok(())
    }

    // =========================================================================
    // Collapsing Operations
    // =========================================================================

    /// `Some` with the canonical account details on a match, `None` on a
    /// wrong username, wrong password or any failure.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Option<AuthenticatedSalesperson> {
        self.try_authenticate(username, password)
            .await
            .unwrap_or_else(|err| {
                log_failure("authenticate", &err);
                None
            })
    }

    /// Summary rows; empty on failure.
    pub async fn car_sales_summary(&self) -> Vec<CarSaleSummary> {
        self.try_car_sales_summary().await.unwrap_or_else(|err| {
            log_failure("car_sales_summary", &err);
            Vec::new()
        })
    }

    /// Search rows; empty on failure.
    pub async fn find_car_sales(&self, search_text: &str) -> Vec<CarSaleListing> {
        self.try_find_car_sales(search_text)
            .await
            .unwrap_or_else(|err| {
                log_failure("find_car_sales", &err);
                Vec::new()
            })
    }

    /// `true` when the car was recorded.
    pub async fn add_car_sale(
        &self,
        make: &str,
        model: &str,
        built_year: &str,
        odometer: &str,
        price: &str,
    ) -> bool {
        match self
            .try_add_car_sale(make, model, built_year, odometer, price)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                log_failure("add_car_sale", &err);
                false
            }
        }
    }

    /// `true` when the sale was completed.
    pub async fn update_car_sale(
        &self,
        car_sale_id: &str,
        customer_id: &str,
        salesperson_username: &str,
        sale_date: &str,
    ) -> bool {
        match self
            .try_update_car_sale(car_sale_id, customer_id, salesperson_username, sale_date)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                log_failure("update_car_sale", &err);
                false
            }
        }
    }
}

fn log_failure(operation: &str, err: &DbError) {
    warn!(operation, kind = ?err.kind(), error = %err, "Operation failed");
}

// =============================================================================
// Unit Tests
// =============================================================================
