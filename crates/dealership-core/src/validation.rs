//! # Validation Module
//!
//! Coerces caller-supplied text into typed values and applies range rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Calling layer (form fields arrive as text)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Type coercion (integer / decimal / calendar date)                 │
//! │  ├── Range rules (year, odometer, price, sale date)                    │
//! │  └── Trimming and price rounding                                        │
//! │           │   any failure here → no database contact at all            │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  ├── CHECK constraints (non-negative values)                           │
//! │  └── Foreign keys (make/model/customer/salesperson)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function takes `today` from the caller instead of reading the clock.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;
use crate::money::Money;
use crate::SALE_DATE_INPUT_FORMAT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Scalar Coercion
// =============================================================================

/// Parses a trimmed integer.
fn parse_integer(field: &str, text: &str) -> ValidationResult<i32> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    text.parse::<i32>()
        .map_err(|_| ValidationError::invalid_format(field, "must be a whole number"))
}

/// Parses a trimmed, non-empty name.
fn parse_name(field: &str, text: &str) -> ValidationResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(text.to_string())
}

/// Validates a built year.
///
/// ## Rules
/// - Whole number
/// - Between 0 and the current year, inclusive
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use dealership_core::validation::parse_built_year;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(parse_built_year("2020", today).unwrap(), 2020);
/// assert!(parse_built_year("2026", today).is_err());
/// assert!(parse_built_year("-1", today).is_err());
/// ```
pub fn parse_built_year(text: &str, today: NaiveDate) -> ValidationResult<i32> {
    let year = parse_integer("built year", text)?;
    let current_year = today.year();

    if !(0..=current_year).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "built year".to_string(),
            min: 0,
            max: i64::from(current_year),
        });
    }

    Ok(year)
}

/// Validates an odometer reading (whole number, zero or more).
pub fn parse_odometer(text: &str) -> ValidationResult<i32> {
    let odometer = parse_integer("odometer", text)?;

    if odometer < 0 {
        return Err(ValidationError::Negative {
            field: "odometer".to_string(),
        });
    }

    Ok(odometer)
}

/// Validates a price.
///
/// ## Rules
/// - Decimal number (see [`Money`]'s `FromStr`)
/// - Not negative; `-0.001` counts as negative even though it rounds to zero
/// - Rounded half-up to cents
///
/// ## Example
/// ```rust
/// use dealership_core::validation::parse_price;
///
/// assert_eq!(parse_price("18500.555").unwrap().cents(), 1_850_056);
/// assert!(parse_price("-0.01").is_err());
/// assert!(parse_price("cheap").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let trimmed = text.trim();
    let price: Money = trimmed
        .parse()
        .map_err(|e| ValidationError::invalid_format("price", format!("{e}")))?;

    let signed_nonzero =
        trimmed.starts_with('-') && trimmed.bytes().any(|b| (b'1'..=b'9').contains(&b));
    if price.is_negative() || signed_nonzero {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Coerces a car sale identifier.
pub fn parse_car_sale_id(text: &str) -> ValidationResult<i32> {
    parse_integer("car sale id", text)
}

/// Validates a sale date.
///
/// ## Rules
/// - Required
/// - Calendar date in `YYYY-MM-DD` form
/// - Not after `today`
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use dealership_core::validation::parse_sale_date;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert!(parse_sale_date("2025-06-01", today).is_ok());
/// assert!(parse_sale_date("2025-06-02", today).is_err());
/// assert!(parse_sale_date("2025-02-30", today).is_err());
/// ```
pub fn parse_sale_date(text: &str, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::required("sale date"));
    }

    let date = NaiveDate::parse_from_str(text, SALE_DATE_INPUT_FORMAT)
        .map_err(|e| ValidationError::invalid_format("sale date", e.to_string()))?;

    if date > today {
        return Err(ValidationError::InFuture {
            field: "sale date".to_string(),
        });
    }

    Ok(date)
}

/// Normalizes free search text.
///
/// Trims surrounding whitespace; an empty result matches every row.
pub fn normalize_search_text(text: &str) -> String {
    text.trim().to_string()
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// A validated request to put a car on the lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCarSale {
    /// Make name as typed (trimmed); resolved case-insensitively later.
    pub make: String,
    /// Model name as typed (trimmed); resolved under the make later.
    pub model: String,
    pub built_year: i32,
    pub odometer: i32,
    /// Rounded to cents.
    pub price: Money,
}

impl NewCarSale {
    /// Coerces and checks every field of a record-sale request.
    ///
    /// ## User Workflow
    /// ```text
    /// "Toyota", "Corolla", "2020", "15000", "18500.555"
    ///      │
    ///      ▼
    /// NewCarSale::parse ← THIS FUNCTION
    ///      │
    ///      ├── year / odometer / price bad? → ValidationError (no DB contact)
    ///      │
    ///      └── OK → NewCarSale { price: 18500.56, .. } → make/model lookup
    /// ```
    pub fn parse(
        make: &str,
        model: &str,
        built_year: &str,
        odometer: &str,
        price: &str,
        today: NaiveDate,
    ) -> ValidationResult<Self> {
        Ok(NewCarSale {
            make: parse_name("make", make)?,
            model: parse_name("model", model)?,
            built_year: parse_built_year(built_year, today)?,
            odometer: parse_odometer(odometer)?,
            price: parse_price(price)?,
        })
    }
}

/// A validated request to mark a car as sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleCompletion {
    pub car_sale_id: i32,
    /// Customer identifier as typed (trimmed); resolved case-insensitively.
    pub customer_id: String,
    /// Salesperson username as typed (trimmed); resolved case-insensitively.
    pub salesperson_username: String,
    pub sale_date: NaiveDate,
}

impl SaleCompletion {
    /// Coerces and checks every field of a complete-sale request.
    pub fn parse(
        car_sale_id: &str,
        customer_id: &str,
        salesperson_username: &str,
        sale_date: &str,
        today: NaiveDate,
    ) -> ValidationResult<Self> {
        Ok(SaleCompletion {
            car_sale_id: parse_car_sale_id(car_sale_id)?,
            customer_id: parse_name("customer", customer_id)?,
            salesperson_username: parse_name("salesperson", salesperson_username)?,
            sale_date: parse_sale_date(sale_date, today)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_parse_built_year() {
        assert_eq!(parse_built_year("2020", today()).unwrap(), 2020);
        assert_eq!(parse_built_year(" 0 ", today()).unwrap(), 0);
        assert_eq!(parse_built_year("2025", today()).unwrap(), 2025);

        assert!(matches!(
            parse_built_year("-1", today()),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(parse_built_year("2026", today()).is_err());
        assert!(matches!(
            parse_built_year("twenty", today()),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_built_year("2020.0", today()).is_err());
        assert!(matches!(
            parse_built_year("", today()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_odometer() {
        assert_eq!(parse_odometer("15000").unwrap(), 15000);
        assert_eq!(parse_odometer("0").unwrap(), 0);
        assert!(matches!(
            parse_odometer("-5"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(parse_odometer("15k").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("18500.555").unwrap().cents(), 1_850_056);
        assert_eq!(parse_price("0").unwrap().cents(), 0);
        assert_eq!(parse_price("-0").unwrap().cents(), 0);

        assert!(matches!(
            parse_price("-0.01"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_price("-0.001"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_price("free"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_sale_date() {
        let d = parse_sale_date("2024-01-15", today()).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(parse_sale_date("2025-03-10", today()).unwrap(), today());

        assert!(matches!(
            parse_sale_date("2025-03-11", today()),
            Err(ValidationError::InFuture { .. })
        ));
        assert!(matches!(
            parse_sale_date("15-01-2024", today()),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_sale_date("  ", today()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_normalize_search_text() {
        assert_eq!(normalize_search_text("  corolla \n"), "corolla");
        assert_eq!(normalize_search_text("   "), "");
    }

    #[test]
    fn test_new_car_sale_trims_and_rounds() {
        let sale =
            NewCarSale::parse(" Toyota ", "Corolla\t", "2020", "15000", "18500.555", today())
                .unwrap();

        assert_eq!(
            sale,
            NewCarSale {
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                built_year: 2020,
                odometer: 15000,
                price: Money::from_cents(1_850_056),
            }
        );
    }

    #[test]
    fn test_new_car_sale_rejects_each_bad_field() {
        let t = today();
        assert!(NewCarSale::parse("Toyota", "Corolla", "-1", "15000", "100", t).is_err());
        assert!(NewCarSale::parse("Toyota", "Corolla", "2020", "-5", "100", t).is_err());
        assert!(NewCarSale::parse("Toyota", "Corolla", "2020", "15000", "-0.01", t).is_err());
        assert!(NewCarSale::parse("Toyota", "Corolla", "abc", "15000", "100", t).is_err());
        assert!(NewCarSale::parse("Toyota", "Corolla", "2020", "x", "100", t).is_err());
        assert!(NewCarSale::parse("Toyota", "Corolla", "2020", "15000", "x", t).is_err());
        assert!(NewCarSale::parse("  ", "Corolla", "2020", "15000", "100", t).is_err());
        assert!(NewCarSale::parse("Toyota", "", "2020", "15000", "100", t).is_err());
    }

    #[test]
    fn test_sale_completion() {
        let completion = SaleCompletion::parse(" 7 ", " C001 ", "JDoe", "2024-01-15", today())
            .unwrap();
        assert_eq!(completion.car_sale_id, 7);
        assert_eq!(completion.customer_id, "C001");
        assert_eq!(completion.salesperson_username, "JDoe");
        assert_eq!(
            completion.sale_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );

        assert!(SaleCompletion::parse("seven", "c001", "jdoe", "2024-01-15", today()).is_err());
        assert!(SaleCompletion::parse("7", "c001", "jdoe", "2099-01-01", today()).is_err());
        assert!(SaleCompletion::parse("7", "c001", "jdoe", "", today()).is_err());
        assert!(SaleCompletion::parse("7", "", "jdoe", "2024-01-15", today()).is_err());
    }
}
