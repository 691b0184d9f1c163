//! Connection pool and embedded migrations.

use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

/// Where the database lives.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectTarget {
    /// A full `postgres://` connection URL.
    Url(String),
    /// Individual connection parameters.
    Parts {
        /// Database name.
        database: String,
        /// Role to connect as.
        user: String,
        /// Password of the role.
        password: String,
        /// Server host name.
        host: String,
        /// Server port.
        port: u16,
    },
}

// Hand-written so that passwords never reach the logs.
impl std::fmt::Debug for ConnectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(_) => f.write_str("Url(..)"),
            Self::Parts {
                database,
                user,
                host,
                port,
                ..
            } => f
                .debug_struct("Parts")
                .field("database", database)
                .field("user", user)
                .field("host", host)
                .field("port", port)
                .finish_non_exhaustive(),
        }
    }
}

/// Pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Connection target.
    pub target: ConnectTarget,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Upper bound of open connections.
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// Builds the driver's connection options.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` if the URL cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.target {
            ConnectTarget::Url(url) => url.parse(),
            ConnectTarget::Parts {
                database,
                user,
                password,
                host,
                port,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }
}

/// Opens the connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the options are invalid or the server is
/// unreachable.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .connect_with(settings.connect_options()?)
        .await?;
    info!(
        min_connections = settings.min_connections,
        max_connections = settings.max_connections,
        "database pool established"
    );
    Ok(pool)
}

/// Applies the embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history
/// diverges from the embedded one.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
