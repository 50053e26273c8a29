//! # Repository Module
//!
//! Database repository implementations for dealership records.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  DataAccess facade                                                     │
//! │       │                                                                 │
//! │       │  db.car_sales().record(&new_sale)                              │
//! │       ▼                                                                 │
//! │  CarSaleRepository                                                     │
//! │  ├── summary(&self)                                                    │
//! │  ├── search(&self, text, today)                                        │
//! │  ├── record(&self, sale)          ── one transaction ──┐               │
//! │  └── complete(&self, completion)  ── one transaction ──┤               │
//! │       │                                                │               │
//! │       │  lookups run on the transaction's connection   │               │
//! │       ▼                                                ▼               │
//! │  catalog::find_make / find_model / find_customer   finish_transaction  │
//! │  salesperson::find_salesperson                     commit or rollback  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SalespersonRepository`](salesperson::SalespersonRepository) - Accounts and login
//! - [`CatalogRepository`](catalog::CatalogRepository) - Makes, models, customers
//! - [`CarSaleRepository`](car_sale::CarSaleRepository) - Summary, search, record, complete

use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};

use crate::error::DbResult;

pub mod car_sale;
pub mod catalog;
pub mod salesperson;

/// Commits on `Ok`, rolls back on `Err`, and hands the result back.
///
/// A failed rollback is logged; the original error is what the caller sees.
pub(crate) async fn finish_transaction<T>(
    tx: Transaction<'static, Postgres>,
    result: DbResult<T>,
) -> DbResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            } else {
                debug!(error = %err, "Transaction rolled back");
            }
            Err(err)
        }
    }
}
