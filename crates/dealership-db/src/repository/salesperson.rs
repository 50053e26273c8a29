//! # Salesperson Repository
//!
//! Salesperson accounts and login.
//!
//! ## Authentication Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Authentication Flow                                │
//! │                                                                         │
//! │  authenticate("JDOE", "pw")                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE LOWER(username) = LOWER($1)                          │
//! │       │                                                                 │
//! │       ├── no row?           → Ok(None)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  argon2 verify(pw, password_hash)                                      │
//! │       │                                                                 │
//! │       ├── mismatch?         → Ok(None)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Some(AuthenticatedSalesperson { username: "jdoe", .. }))           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unknown username and a wrong password are indistinguishable to the
//! caller.

use sqlx::PgConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use dealership_core::password::{hash_password, verify_password};
use dealership_core::{AuthenticatedSalesperson, Salesperson};

/// Looks up a salesperson by username, ignoring case.
///
/// Runs on the given connection so it can share a transaction.
pub async fn find_salesperson(
    conn: &mut PgConnection,
    username: &str,
) -> DbResult<Option<Salesperson>> {
    let person = sqlx::query_as::<_, Salesperson>(
        r#"
        SELECT username, password_hash, first_name, last_name
        FROM salesperson
        WHERE LOWER(username) = LOWER($1)
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;

    Ok(person)
}

/// Repository for salesperson database operations.
#[derive(Debug, Clone)]
pub struct SalespersonRepository {
    db: Database,
}

impl SalespersonRepository {
    /// Creates a new SalespersonRepository.
    pub fn new(db: Database) -> Self {
        SalespersonRepository { db }
    }

    /// Gets a salesperson by username (case-insensitive).
    pub async fn find(&self, username: &str) -> DbResult<Option<Salesperson>> {
        let mut conn = self.db.acquire().await?;
        find_salesperson(&mut conn, username).await
    }

    /// Checks a username/password pair.
    ///
    /// ## Returns
    /// * `Ok(Some(_))` - Credentials match; names come from the stored row
    /// * `Ok(None)` - Unknown username or wrong password
    /// * `Err(DbError)` - The lookup itself failed
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<AuthenticatedSalesperson>> {
        let Some(person) = self.find(username).await? else {
            debug!(username = %username, "Unknown salesperson");
            return Ok(None);
        };

        if !verify_password(password, &person.password_hash) {
            debug!(username = %person.username, "Password mismatch");
            return Ok(None);
        }

        debug!(username = %person.username, "Salesperson authenticated");
        Ok(Some(person.into()))
    }

    /// Creates a salesperson account, storing a salted hash of `password`.
    ///
    /// ## Errors
    /// * `UniqueViolation` - Username already taken (ignoring case)
    pub async fn insert(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> DbResult<Salesperson> {
        let password_hash =
            hash_password(password).map_err(|e| DbError::Internal(e.to_string()))?;

        let person = Salesperson {
            username: username.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };

        debug!(username = %person.username, "Inserting salesperson");

        sqlx::query(
            r#"
            INSERT INTO salesperson (username, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&person.username)
        .bind(&person.password_hash)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .execute(self.db.pool())
        .await?;

        Ok(person)
    }
}
