//! # dealership-db: Database Layer for Dealership Records
//!
//! This crate provides PostgreSQL access for the dealership records system:
//! connection configuration, scoped connections, repositories, migrations,
//! and the [`DataAccess`] facade the calling layer talks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dealership Records Data Flow                        │
//! │                                                                         │
//! │  Calling layer (login form, summary page, search box, sale forms)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dealership-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐  │   │
//! │  │   │  DataAccess  │   │ Repositories  │   │    Database      │  │   │
//! │  │   │ (service.rs) │──►│ Salesperson   │──►│    (pool.rs)     │  │   │
//! │  │   │ validate,    │   │ Catalog       │   │ lazy PgPool      │  │   │
//! │  │   │ collapse     │   │ CarSale       │   │ acquire / begin  │  │   │
//! │  │   └──────────────┘   └───────────────┘   └────────┬─────────┘  │   │
//! │  │                                                   │            │   │
//! │  └───────────────────────────────────────────────────┼────────────┘   │
//! │                                                      ▼                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   PostgreSQL: make, model, customer, salesperson, car_sale      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Connection settings from the environment
//! - [`pool`] - Lazily connecting pool and scoped acquisition
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and failure kinds
//! - [`repository`] - Repository implementations (salesperson, catalog, car sale)
//! - [`service`] - The `DataAccess` facade
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dealership_db::{DataAccess, DbConfig};
//!
//! let config = DbConfig::from_env()?;
//! let data = DataAccess::connect_lazy(&config);
//!
//! if let Some(user) = data.authenticate("jdoe", "secret").await {
//!     let rows = data.find_car_sales("corolla").await;
//!     data.add_car_sale("Toyota", "Corolla", "2020", "15000", "18500.555").await;
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult, FailureKind};
pub use pool::Database;
pub use service::DataAccess;

// Repository re-exports for convenience
pub use repository::car_sale::CarSaleRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::salesperson::SalespersonRepository;
