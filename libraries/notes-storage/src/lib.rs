//! Notes Storage
//!
//! Multi-user `SQLite` database layer for the notes server.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity (`users`, `notes`) owns its own queries
//! - **Owner Scoping**: Every note query carries the owning user's id in its predicate
//! - **Constraints in the schema**: email uniqueness and the note -> user
//!   foreign key are enforced by `SQLite`, not by read-then-write checks
//!
//! # Example
//!
//! ```rust,no_run
//! use notes_storage::{create_pool, run_migrations, Database};
//! use notes_core::NoteRepository;
//! use notes_core::UserId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://notes.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let db = Database::new(pool);
//! let notes = db.list_notes_by_owner(&UserId::new("some-user")).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod notes;
pub mod users;

pub use context::Database;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://notes.db>`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
