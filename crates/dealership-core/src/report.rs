//! # Report Rows
//!
//! Renders the typed query rows into the text rows the calling layer shows,
//! and computes the date window that search applies to completed sales.
//!
//! ## Rendering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field                  Typed row              Rendered row             │
//! │  ─────────────────────  ─────────────────────  ──────────────────────   │
//! │  price / revenue        1850056 (cents)        "18500.56"               │
//! │  sale date              Some(2024-01-15)       "15-01-2024"             │
//! │  sale date (unsold)     None                   ""                       │
//! │  buyer / salesperson    None                   ""                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CarSaleSearchRecord, CarSaleSummaryRecord};
use crate::{SALE_DATE_DISPLAY_FORMAT, SEARCH_WINDOW_YEARS};

// =============================================================================
// Dates
// =============================================================================

/// Formats a sale date as day-month-year, or empty text when absent.
pub fn format_sale_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(SALE_DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// Earliest sale date a completed sale may have and still appear in search.
///
/// Three calendar years before `today`; 29 February clamps to 28 February.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use dealership_core::report::search_cutoff;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// assert_eq!(search_cutoff(today), NaiveDate::from_ymd_opt(2022, 3, 10).unwrap());
/// ```
pub fn search_cutoff(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12 * SEARCH_WINDOW_YEARS))
        .unwrap_or(NaiveDate::MIN)
}

// =============================================================================
// Summary Rows
// =============================================================================

/// One line of the sales summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CarSaleSummary {
    pub make: String,
    pub model: String,
    pub available_units: i64,
    pub sold_units: i64,
    /// Revenue from sold units, two decimals ("0.00" when none).
    pub sold_total_prices: String,
    /// Most recent sale date as DD-MM-YYYY, empty when nothing sold.
    pub last_purchase_at: String,
}

impl From<CarSaleSummaryRecord> for CarSaleSummary {
    fn from(record: CarSaleSummaryRecord) -> Self {
        CarSaleSummary {
            make: record.make_name,
            model: record.model_name,
            available_units: record.available_units,
            sold_units: record.sold_units,
            sold_total_prices: Money::from_cents(record.sold_total_cents).to_string(),
            last_purchase_at: format_sale_date(record.last_purchased_at),
        }
    }
}

// =============================================================================
// Search Rows
// =============================================================================

/// One search result line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CarSaleListing {
    pub car_sale_id: i32,
    pub make: String,
    pub model: String,
    pub built_year: i32,
    pub odometer: i32,
    /// Two decimals.
    pub price: String,
    pub is_sold: bool,
    /// DD-MM-YYYY, empty while unsold.
    pub sale_date: String,
    /// Empty while unsold.
    pub buyer: String,
    /// Empty while unsold.
    pub salesperson: String,
}

impl From<CarSaleSearchRecord> for CarSaleListing {
    fn from(record: CarSaleSearchRecord) -> Self {
        CarSaleListing {
            car_sale_id: record.car_sale_id,
            make: record.make_name,
            model: record.model_name,
            built_year: record.built_year,
            odometer: record.odometer,
            price: Money::from_cents(record.price_cents).to_string(),
            is_sold: record.is_sold,
            sale_date: format_sale_date(record.sale_date),
            buyer: record.buyer_name.unwrap_or_default(),
            salesperson: record.salesperson_name.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary_record(available: i64, sold: i64, cents: i64, last: Option<NaiveDate>) -> CarSaleSummaryRecord {
        CarSaleSummaryRecord {
            make_name: "Toyota".to_string(),
            model_name: "Corolla".to_string(),
            available_units: available,
            sold_units: sold,
            sold_total_cents: cents,
            last_purchased_at: last,
        }
    }

    #[test]
    fn test_format_sale_date() {
        assert_eq!(format_sale_date(Some(date(2024, 1, 5))), "05-01-2024");
        assert_eq!(format_sale_date(None), "");
    }

    #[test]
    fn test_search_cutoff() {
        assert_eq!(search_cutoff(date(2025, 3, 10)), date(2022, 3, 10));
        assert_eq!(search_cutoff(date(2024, 2, 29)), date(2021, 2, 28));
    }

    #[test]
    fn test_summary_rendering_with_sales() {
        let row = CarSaleSummary::from(summary_record(2, 3, 5_500_012, Some(date(2024, 11, 2))));
        assert_eq!(row.available_units, 2);
        assert_eq!(row.sold_units, 3);
        assert_eq!(row.sold_total_prices, "55000.12");
        assert_eq!(row.last_purchase_at, "02-11-2024");
    }

    #[test]
    fn test_summary_rendering_without_sales() {
        let row = CarSaleSummary::from(summary_record(0, 0, 0, None));
        assert_eq!(row.sold_total_prices, "0.00");
        assert_eq!(row.last_purchase_at, "");

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["availableUnits"], 0);
        assert_eq!(json["soldTotalPrices"], "0.00");
        assert_eq!(json["lastPurchaseAt"], "");
    }

    #[test]
    fn test_listing_rendering_unsold() {
        let listing = CarSaleListing::from(CarSaleSearchRecord {
            car_sale_id: 3,
            make_name: "Toyota".to_string(),
            model_name: "Corolla".to_string(),
            built_year: 2020,
            odometer: 15000,
            price_cents: 1_850_056,
            is_sold: false,
            sale_date: None,
            buyer_name: None,
            salesperson_name: None,
        });

        assert_eq!(listing.price, "18500.56");
        assert_eq!(listing.sale_date, "");
        assert_eq!(listing.buyer, "");
        assert_eq!(listing.salesperson, "");
    }

    #[test]
    fn test_listing_rendering_sold() {
        let listing = CarSaleListing::from(CarSaleSearchRecord {
            car_sale_id: 7,
            make_name: "Honda".to_string(),
            model_name: "Civic".to_string(),
            built_year: 2018,
            odometer: 40210,
            price_cents: 1_200_000,
            is_sold: true,
            sale_date: Some(date(2024, 1, 15)),
            buyer_name: Some("Ada Lovelace".to_string()),
            salesperson_name: Some("John Doe".to_string()),
        });

        assert_eq!(listing.price, "12000.00");
        assert_eq!(listing.sale_date, "15-01-2024");
        assert_eq!(listing.buyer, "Ada Lovelace");
        assert_eq!(listing.salesperson, "John Doe");

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["carSaleId"], 7);
        assert_eq!(json["isSold"], true);
    }
}
