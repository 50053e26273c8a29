//! # Domain Types
//!
//! The five persisted entities of the dealership, plus the typed rows the
//! summary and search queries produce.
//!
//! ## Entity Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Dealership Schema                               │
//! │                                                                         │
//! │  ┌──────────────┐        ┌──────────────┐                              │
//! │  │    Make      │ 1    * │    Model     │                              │
//! │  │  make_code   │◄───────│  model_code  │                              │
//! │  │  make_name   │        │  model_name  │                              │
//! │  └──────┬───────┘        └──────┬───────┘                              │
//! │         │                       │                                       │
//! │         │ 1                   1 │                                       │
//! │         ▼ *                   * ▼                                       │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │               CarSale                   │                           │
//! │  │  car_sale_id, built_year, odometer,     │                           │
//! │  │  price, is_sold, sale_date              │                           │
//! │  └──────┬────────────────────────┬─────────┘                           │
//! │         │ buyer_id (nullable)    │ salesperson_id (nullable)           │
//! │         ▼                        ▼                                      │
//! │  ┌──────────────┐        ┌──────────────┐                              │
//! │  │   Customer   │        │ Salesperson  │                              │
//! │  │  customer_id │        │  username    │                              │
//! │  └──────────────┘        └──────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A vehicle manufacturer brand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Make {
    pub make_code: String,
    /// Unique, matched case-insensitively.
    pub make_name: String,
}

/// A vehicle line under a make.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Model {
    pub model_code: String,
    /// Unique per make, matched case-insensitively.
    pub model_name: String,
    pub make_code: String,
}

// =============================================================================
// People
// =============================================================================

/// A buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// A salesperson account as stored.
///
/// `password_hash` is a PHC-format argon2 string; see [`crate::password`].
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Salesperson {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for Salesperson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salesperson")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Result of a successful login.
///
/// `username` is the canonical spelling from the database, whatever case
/// the caller typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedSalesperson {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Salesperson> for AuthenticatedSalesperson {
    fn from(person: Salesperson) -> Self {
        AuthenticatedSalesperson {
            username: person.username,
            first_name: person.first_name,
            last_name: person.last_name,
        }
    }
}

// =============================================================================
// Car Sale
// =============================================================================

/// One vehicle on the lot, available or sold.
///
/// ## Lifecycle
/// ```text
///   record sale                         complete sale
///  ────────────► Available ────────────────────────────► Sold
///                is_sold = false                        is_sold = true
///                sale_date = NULL                       sale_date <= today
///                buyer_id = NULL                        buyer_id set
///                salesperson_id = NULL                  salesperson_id set
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CarSale {
    pub car_sale_id: i32,
    pub make_code: String,
    pub model_code: String,
    pub built_year: i32,
    pub odometer: i32,
    pub price_cents: i64,
    pub is_sold: bool,
    pub sale_date: Option<NaiveDate>,
    pub buyer_id: Option<String>,
    pub salesperson_id: Option<String>,
}

impl CarSale {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Still on the lot.
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.is_sold
    }
}

// =============================================================================
// Query Rows
// =============================================================================

/// Aggregates for one (make, model) pair, as the summary query returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CarSaleSummaryRecord {
    pub make_name: String,
    pub model_name: String,
    pub available_units: i64,
    pub sold_units: i64,
    pub sold_total_cents: i64,
    pub last_purchased_at: Option<NaiveDate>,
}

/// One car sale joined with its names, as the search query returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CarSaleSearchRecord {
    pub car_sale_id: i32,
    pub make_name: String,
    pub model_name: String,
    pub built_year: i32,
    pub odometer: i32,
    pub price_cents: i64,
    pub is_sold: bool,
    pub sale_date: Option<NaiveDate>,
    /// "First Last" of the buyer, `None` while unsold.
    pub buyer_name: Option<String>,
    /// "First Last" of the salesperson, `None` while unsold.
    pub salesperson_name: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn salesperson() -> Salesperson {
        Salesperson {
            username: "jdoe".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[test]
    fn test_salesperson_debug_hides_hash() {
        let rendered = format!("{:?}", salesperson());
        assert!(rendered.contains("jdoe"));
        assert!(!rendered.contains("argon2"));
    }

    #[test]
    fn test_authenticated_salesperson_drops_hash() {
        let auth = AuthenticatedSalesperson::from(salesperson());
        assert_eq!(auth.username, "jdoe");
        assert_eq!(auth.first_name, "John");

        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(json["firstName"], "John");
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_car_sale_price_and_state() {
        let sale = CarSale {
            car_sale_id: 1,
            make_code: "TOY".to_string(),
            model_code: "COR".to_string(),
            built_year: 2020,
            odometer: 15000,
            price_cents: 1_850_056,
            is_sold: false,
            sale_date: None,
            buyer_id: None,
            salesperson_id: None,
        };
        assert_eq!(sale.price().to_string(), "18500.56");
        assert!(sale.is_available());
    }
}
