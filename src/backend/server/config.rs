/**
 * Server Configuration
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary before this runs), with defaults suitable for local
 * development. Tests build it directly with [`ServerConfig::builder`].
 *
 * | Variable                         | Default                              |
 * |----------------------------------|--------------------------------------|
 * | `PORT`                           | `3000`                               |
 * | `DATABASE_URL`                   | `sqlite://socialgram.db?mode=rwc`    |
 * | `DATABASE_MAX_CONNECTIONS`       | `5`                                  |
 * | `SECRET_KEY`                     | required                             |
 * | `URL`                            | unset (CORS disabled)                |
 * | `STATIC_DIR`                     | `frontend/dist`                      |
 * | `NOTIFICATION_DEDUP_WINDOW_SECS` | `60`                                 |
 * | `NOTIFICATION_RETENTION`         | `100`                                |
 * | `NOTIFICATION_PAGE_SIZE`         | `20`                                 |
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::shared::social::DEFAULT_PAGE_SIZE;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://socialgram.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STATIC_DIR: &str = "frontend/dist";
const DEFAULT_DEDUP_WINDOW_SECS: u64 = 60;
const DEFAULT_RETENTION: i64 = 100;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Rules applied when a notification is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPolicy {
    /// An identical notification inside this window is dropped
    pub dedup_window: Duration,
    /// Notifications kept per recipient; older ones are trimmed on insert
    pub retention: i64,
    /// Page size for listing when the client gives none
    pub page_size: i64,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            dedup_window: Duration::from_secs(DEFAULT_DEDUP_WINDOW_SECS),
            retention: DEFAULT_RETENTION,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// HMAC secret the session tokens are signed with
    pub jwt_secret: String,
    /// Browser origin allowed to call the API with credentials
    pub client_origin: Option<String>,
    /// Built single-page frontend, served when present
    pub static_dir: PathBuf,
    pub notifications: NotificationPolicy,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(port) = parse_var(&lookup, "PORT")? {
            builder = builder.port(port);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(max) = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            builder = builder.database_max_connections(max);
        }
        if let Some(secret) = lookup("SECRET_KEY") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(origin) = lookup("URL").filter(|o| !o.trim().is_empty()) {
            builder = builder.client_origin(origin);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "NOTIFICATION_DEDUP_WINDOW_SECS")? {
            builder = builder.dedup_window(Duration::from_secs(secs));
        }
        if let Some(retention) = parse_var(&lookup, "NOTIFICATION_RETENTION")? {
            builder = builder.notification_retention(retention);
        }
        if let Some(size) = parse_var(&lookup, "NOTIFICATION_PAGE_SIZE")? {
            builder = builder.page_size(size);
        }

        builder.build()
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    database_max_connections: Option<u32>,
    jwt_secret: Option<String>,
    client_origin: Option<String>,
    static_dir: Option<PathBuf>,
    notifications: NotificationPolicy,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn database_max_connections(mut self, max: u32) -> Self {
        self.database_max_connections = Some(max);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn client_origin(mut self, origin: impl Into<String>) -> Self {
        self.client_origin = Some(origin.into());
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn dedup_window(mut self, window: Duration) -> Self {
        self.notifications.dedup_window = window;
        self
    }

    pub fn notification_retention(mut self, retention: i64) -> Self {
        self.notifications.retention = retention;
        self
    }

    pub fn page_size(mut self, size: i64) -> Self {
        self.notifications.page_size = size;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("SECRET_KEY"))?;

        if self.notifications.retention < 1 {
            return Err(ConfigError::InvalidValue {
                name: "NOTIFICATION_RETENTION",
                value: self.notifications.retention.to_string(),
            });
        }
        if self.notifications.page_size < 1 {
            return Err(ConfigError::InvalidValue {
                name: "NOTIFICATION_PAGE_SIZE",
                value: self.notifications.page_size.to_string(),
            });
        }

        Ok(ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: self
                .database_max_connections
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                .max(1),
            jwt_secret,
            client_origin: self.client_origin,
            static_dir: self
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            notifications: self.notifications,
        })
    }
}

/// Open the database pool and bring the schema up to date
///
/// An in-memory database only lives as long as its connection, so it gets a
/// single connection that is never recycled.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, crate::backend::BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?.foreign_keys(true);
    let in_memory = config.database_url.contains(":memory:");

    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_with(options)
            .await?
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
