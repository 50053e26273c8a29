//! # Database Configuration
//!
//! Connection settings are injected, never compiled in. `DbConfig::from_env`
//! reads them at process start:
//!
//! | Variable                        | Required | Default |
//! |---------------------------------|----------|---------|
//! | `DEALERSHIP_DB_HOST`            | yes      |         |
//! | `DEALERSHIP_DB_PORT`            | no       | 5432    |
//! | `DEALERSHIP_DB_NAME`            | yes      |         |
//! | `DEALERSHIP_DB_USER`            | yes      |         |
//! | `DEALERSHIP_DB_PASSWORD`        | yes      |         |
//! | `DEALERSHIP_DB_SCHEMA`          | no       | (server default search_path) |
//! | `DEALERSHIP_DB_MAX_CONNECTIONS` | no       | 5       |

use sqlx::postgres::PgConnectOptions;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

/// Default PostgreSQL port.
pub const DEFAULT_PORT: u16 = 5432;

const ENV_HOST: &str = "DEALERSHIP_DB_HOST";
const ENV_PORT: &str = "DEALERSHIP_DB_PORT";
const ENV_NAME: &str = "DEALERSHIP_DB_NAME";
const ENV_USER: &str = "DEALERSHIP_DB_USER";
const ENV_PASSWORD: &str = "DEALERSHIP_DB_PASSWORD";
const ENV_SCHEMA: &str = "DEALERSHIP_DB_SCHEMA";
const ENV_MAX_CONNECTIONS: &str = "DEALERSHIP_DB_MAX_CONNECTIONS";

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Database configuration.
///
/// ## Example
/// ```rust
/// use dealership_db::DbConfig;
///
/// let config = DbConfig::new("db.internal", "dealership", "app", "s3cret")
///     .port(6432)
///     .max_connections(3);
///
/// assert_eq!(config.port, 6432);
/// assert!(!format!("{config:?}").contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,

    /// Schema placed first on the `search_path` of every connection.
    pub schema: Option<String>,

    /// Maximum number of connections in the pool.
    /// Default: 5 (low-concurrency administrative use)
    pub max_connections: u32,

    /// Minimum number of idle connections kept open.
    /// Default: 0 (connections open on demand)
    pub min_connections: u32,

    /// How long an operation waits for a connection before failing.
    /// Default: 10 seconds
    pub acquire_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 5 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: false
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration with the four connection options and defaults
    /// for everything else.
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        DbConfig {
            host: host.into(),
            port: DEFAULT_PORT,
            database: database.into(),
            user: user.into(),
            password: password.into(),
            schema: None,
            max_connections: 5,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            run_migrations: false,
        }
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Loads configuration from a variable map (the environment in
    /// production, a literal map in tests).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let required = |key: &str| -> Result<String, ConfigError> {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingRequired(key.to_string()))
        };

        let mut config = DbConfig::new(
            required(ENV_HOST)?,
            required(ENV_NAME)?,
            required(ENV_USER)?,
            // Passwords may legitimately have surrounding spaces
            vars.get(ENV_PASSWORD)
                .cloned()
                .ok_or_else(|| ConfigError::MissingRequired(ENV_PASSWORD.to_string()))?,
        );

        if let Some(port) = vars.get(ENV_PORT) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_PORT.to_string()))?;
        }

        if let Some(max) = vars.get(ENV_MAX_CONNECTIONS) {
            config.max_connections = max
                .trim()
                .parse()
                .ok()
                .filter(|n: &u32| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string()))?;
        }

        config.schema = vars
            .get(ENV_SCHEMA)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(config)
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Puts a schema first on the search path.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the acquire timeout.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Builds the driver-level connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .application_name("dealership");

        match &self.schema {
            Some(schema) => options.options([("search_path", schema.as_str())]),
            None => options,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_HOST, "db.internal"),
            (ENV_NAME, "dealership"),
            (ENV_USER, "app"),
            (ENV_PASSWORD, "s3cret"),
        ]
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = DbConfig::from_vars(&vars(&required_vars())).unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.database, "dealership");
        assert_eq!(config.user, "app");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.schema, None);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_from_vars_optional_values() {
        let mut pairs = required_vars();
        pairs.push((ENV_PORT, "6432"));
        pairs.push((ENV_SCHEMA, "sales"));
        pairs.push((ENV_MAX_CONNECTIONS, "2"));

        let config = DbConfig::from_vars(&vars(&pairs)).unwrap();
        assert_eq!(config.port, 6432);
        assert_eq!(config.schema.as_deref(), Some("sales"));
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_from_vars_missing_required() {
        for missing in [ENV_HOST, ENV_NAME, ENV_USER, ENV_PASSWORD] {
            let pairs: Vec<_> = required_vars()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();
            assert_eq!(
                DbConfig::from_vars(&vars(&pairs)).unwrap_err(),
                ConfigError::MissingRequired(missing.to_string())
            );
        }
    }

    #[test]
    fn test_from_vars_invalid_values() {
        let mut pairs = required_vars();
        pairs.push((ENV_PORT, "not-a-port"));
        assert_eq!(
            DbConfig::from_vars(&vars(&pairs)).unwrap_err(),
            ConfigError::InvalidValue(ENV_PORT.to_string())
        );

        let mut pairs = required_vars();
        pairs.push((ENV_MAX_CONNECTIONS, "0"));
        assert_eq!(
            DbConfig::from_vars(&vars(&pairs)).unwrap_err(),
            ConfigError::InvalidValue(ENV_MAX_CONNECTIONS.to_string())
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DbConfig::new("h", "d", "u", "hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_builder() {
        let config = DbConfig::new("h", "d", "u", "p")
            .port(1)
            .schema("test_schema")
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(500))
            .run_migrations(true);

        assert_eq!(config.port, 1);
        assert_eq!(config.schema.as_deref(), Some("test_schema"));
        assert_eq!(config.acquire_timeout, Duration::from_millis(500));
        assert!(config.run_migrations);
    }
}
