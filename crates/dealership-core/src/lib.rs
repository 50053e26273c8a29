//! # dealership-core: Pure Domain Logic for Dealership Records
//!
//! This crate holds every rule of the dealership records system that can be
//! expressed without touching a database: the shape of the records, how
//! caller-supplied text is coerced into typed values, how prices are rounded,
//! and how report rows are rendered.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dealership Records Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Calling layer (web front end / CLI, external)         │   │
//! │  │    login ──► summary page ──► search box ──► add / complete     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain values                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  dealership-db (DataAccess)                     │   │
//! │  │       PostgreSQL queries, transactions, repositories            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ dealership-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation │  │  report   │  │   │
//! │  │   │  CarSale  │  │   Money   │  │ NewCarSale │  │  rows &   │  │   │
//! │  │   │  Make ... │  │  parsing  │  │ Completion │  │  cutoff   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK READS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records as persisted (Make, Model, Customer, Salesperson, CarSale)
//! - [`money`] - Money type with integer cents and decimal parsing
//! - [`validation`] - Coercion and range checks for caller input
//! - [`report`] - Summary/search row rendering and the search window
//! - [`password`] - Salted password hashing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dealership_core::validation::NewCarSale;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let sale = NewCarSale::parse(" Toyota ", "Corolla", "2020", "15000", "18500.555", today).unwrap();
//!
//! assert_eq!(sale.make, "Toyota");
//! assert_eq!(sale.price.cents(), 1_850_056);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod password;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How far back completed sales stay visible in search results.
///
/// Unsold cars are always searchable; a sold car drops out of search once
/// its sale date is more than this many years before today.
pub const SEARCH_WINDOW_YEARS: u32 = 3;

/// Display format for sale dates in report rows (day-month-year).
pub const SALE_DATE_DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Input format accepted for sale dates (calendar date).
pub const SALE_DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
