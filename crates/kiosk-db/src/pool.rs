//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  kiosk-server startup                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Concurrent access from HTTP handlers and the report job        │
//! │       ▼                                                                 │
//! │  POST /orders/new        ──► uses Conn1                                │
//! │  GET  /products/selling  ──► uses Conn2                                │
//! │  daily statistics job    ──► uses Conn3                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for file databases:
//! - Readers don't block writers
//! - Writers don't block readers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::mail_history::MailSendHistoryRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./kiosk.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections
    /// open, which an in-memory database needs to keep its data.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1, // Each in-memory connection is its own database
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone: it wraps a [`SqlitePool`], which is itself a handle.
/// Services hold a clone and ask it for repositories per call.
///
/// ## Usage in a Service
/// ```rust,ignore
/// let products = db.products().find_all_by_selling_status_in(
///     ProductSellingStatus::for_display(),
/// ).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads (file databases)
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled (order lines cascade with their order)
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let base_options = if config.is_in_memory() {
            SqliteConnectOptions::new().in_memory(true)
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                // WAL mode: Readers don't block writers, writers don't block readers
                .journal_mode(SqliteJournalMode::Wal)
                // Create file if it doesn't exist
                .create_if_missing(true)
        };

        let connect_options = base_options
            // NORMAL synchronous: Good balance of durability and speed
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has foreign keys disabled by default for backwards compatibility
            .foreign_keys(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(if config.is_in_memory() {
                None
            } else {
                Some(Duration::from_secs(30 * 60))
            })
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// ## When To Call
    /// - Automatically called by `new()` if `run_migrations` is true
    /// - Manually call when migrations are disabled in config
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns `(total, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// Prefer repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Returns the mail send history repository.
    pub fn mail_histories(&self) -> MailSendHistoryRepository {
        MailSendHistoryRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = db.migration_status().await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/kiosk-test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let path = std::env::temp_dir().join(format!(
            "kiosk-db-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        db.close().await;

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
