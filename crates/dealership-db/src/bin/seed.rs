//! # Seed Data Generator
//!
//! Populates the database with a small dealership for development.
//!
//! ## Usage
//! ```bash
//! # Connection settings come from DEALERSHIP_DB_* variables
//! export DEALERSHIP_DB_HOST=localhost DEALERSHIP_DB_NAME=dealership \
//!        DEALERSHIP_DB_USER=app DEALERSHIP_DB_PASSWORD=...
//!
//! # Seed with a password shared by every demo salesperson
//! cargo run -p dealership-db --bin seed -- --password <PW>
//!
//! # Also put N extra unsold cars on the lot
//! cargo run -p dealership-db --bin seed -- --password <PW> --cars 50
//! ```
//!
//! ## Generated Records
//! - Makes and their models
//! - Customers `c001`, `c002`, ...
//! - Salespeople `jdoe`, `asmith`, ... (argon2-hashed password)
//! - Car sales, some completed within the last three years and one older
//!
//! The seed refuses to run against a database that already has makes.

use chrono::{Datelike, Local, Months};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dealership_core::{Customer, Make, Model};
use dealership_db::{DataAccess, Database, DbConfig};

/// (make code, make name, [(model code, model name)])
const CATALOG: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "TOY",
        "Toyota",
        &[("COR", "Corolla"), ("CAM", "Camry"), ("RAV", "RAV4")],
    ),
    (
        "HON",
        "Honda",
        &[("CIV", "Civic"), ("ACC", "Accord"), ("CRV", "CR-V")],
    ),
    ("FOR", "Ford", &[("FOC", "Focus"), ("MUS", "Mustang")]),
    ("MAZ", "Mazda", &[("MZ3", "Mazda3"), ("CX5", "CX-5")]),
];

/// (customer id, first name, last name)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("c001", "Ada", "Lovelace"),
    ("c002", "Alan", "Turing"),
    ("c003", "Grace", "Hopper"),
    ("c004", "Edsger", "Dijkstra"),
];

/// (username, first name, last name)
const SALESPEOPLE: &[(&str, &str, &str)] = &[
    ("jdoe", "John", "Doe"),
    ("asmith", "Anna", "Smith"),
    ("bwong", "Ben", "Wong"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut password: Option<String> = None;
    let mut extra_cars: usize = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    password = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--cars" | "-c" => {
                if i + 1 < args.len() {
                    let Some(count) = parse_car_count(&args[i + 1]) else {
                        error!(
                            value = %args[i + 1],
                            "--cars expects a whole number; run with --help for usage"
                        );
                        std::process::exit(2);
                    };
                    extra_cars = count;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dealership Seed Data Generator");
                println!();
                println!("Usage: seed --password <PW> [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --password <PW>  Password for every demo salesperson (required)");
                println!("  -c, --cars <N>       Extra unsold cars to add (default: 0)");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Connection settings are read from DEALERSHIP_DB_* variables.");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let Some(password) = password else {
        error!("--password is required; run with --help for usage");
        std::process::exit(2);
    };

    let config = DbConfig::from_env()?.run_migrations(true);
    info!(host = %config.host, database = %config.database, "Seeding dealership database");

    let db = Database::new(&config).await?;
    info!("Connected to database, migrations applied");

    let existing = db.catalog().count_makes().await?;
    if existing > 0 {
        warn!(makes = existing, "Database already seeded, skipping");
        return Ok(());
    }

    // Catalog
    for (make_code, make_name, models) in CATALOG {
        db.catalog()
            .insert_make(&Make {
                make_code: make_code.to_string(),
                make_name: make_name.to_string(),
            })
            .await?;

        for (model_code, model_name) in models.iter() {
            db.catalog()
                .insert_model(&Model {
                    model_code: model_code.to_string(),
                    model_name: model_name.to_string(),
                    make_code: make_code.to_string(),
                })
                .await?;
        }
    }
    info!(makes = CATALOG.len(), "Catalog inserted");

    // People
    for (customer_id, first_name, last_name) in CUSTOMERS {
        db.catalog()
            .insert_customer(&Customer {
                customer_id: customer_id.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
            .await?;
    }

    for (username, first_name, last_name) in SALESPEOPLE {
        db.salespeople()
            .insert(username, &password, first_name, last_name)
            .await?;
    }
    info!(
        customers = CUSTOMERS.len(),
        salespeople = SALESPEOPLE.len(),
        "People inserted"
    );

    // Car sales: one of every model, then complete a few at spread-out dates
    let data = DataAccess::new(db.clone());
    let today = Local::now().date_naive();
    let this_year = today.year();

    let mut recorded = Vec::new();
    let mut seed: usize = 0;
    for (_, make_name, models) in CATALOG {
        for (_, model_name) in models.iter() {
            let (year, odometer, price) = car_details(seed, this_year);
            let id = data
                .try_add_car_sale(make_name, model_name, &year, &odometer, &price)
                .await?;
            recorded.push(id);
            seed += 1;
        }
    }

    for n in 0..extra_cars {
        let (make_name, models) = (CATALOG[n % CATALOG.len()].1, CATALOG[n % CATALOG.len()].2);
        let model_name = models[n % models.len()].1;
        let (year, odometer, price) = car_details(seed, this_year);

        if let Err(e) = data
            .try_add_car_sale(make_name, model_name, &year, &odometer, &price)
            .await
        {
            warn!(error = %e, "Failed to add car");
            continue;
        }
        seed += 1;
    }
    info!(cars = seed, "Car sales recorded");

    // Months back from today: recent, mid-window, and one outside the search window
    let completions: &[(usize, u32)] = &[(0, 1), (3, 8), (5, 20), (7, 48)];
    for (n, &(index, months_back)) in completions.iter().enumerate() {
        let Some(&car_sale_id) = recorded.get(index) else {
            continue;
        };
        let sale_date = today
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(today);

        data.try_update_car_sale(
            &car_sale_id.to_string(),
            CUSTOMERS[n % CUSTOMERS.len()].0,
            SALESPEOPLE[n % SALESPEOPLE.len()].0,
            &sale_date.format("%Y-%m-%d").to_string(),
        )
        .await?;
    }
    info!(sold = completions.len(), "Sales completed");

    let summary = data.try_car_sales_summary().await?;
    info!(rows = summary.len(), "Summary verified");

    db.close().await;
    info!("Seed complete");
    Ok(())
}

/// Deterministic (built year, odometer, price) text for the n-th car.
fn car_details(seed: usize, this_year: i32) -> (String, String, String) {
    let year = this_year - (seed % 8) as i32;
    let odometer = (seed * 7919) % 150_000;
    let price_cents = 1_200_000 + (seed * 137_911) % 3_000_000;

    (
        year.to_string(),
        odometer.to_string(),
        format!("{}.{:02}", price_cents / 100, price_cents % 100),
    )
}

/// Parses the `--cars` value. Anything but a non-negative whole number is rejected.
fn parse_car_count(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}
