//! User management and authentication queries

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use notes_core::types::{User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let created_at: i64 = row.try_get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_at)
        .ok_or_else(|| StorageError::CorruptRow(format!("users.created_at = {created_at}")))?;

    Ok(User {
        id: UserId::new(row.try_get::<String, _>("id")?),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at,
    })
}

/// Find a user by exact email match
///
/// Returns `None` on a miss; the caller decides what that means.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Find a user by id
pub async fn find_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, password_hash, created_at FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Create a user
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `email` - Login email (already normalized)
/// * `password_hash` - Hashed password (never the plaintext)
///
/// # Errors
///
/// Returns [`StorageError::Conflict`] if the email is already registered,
/// including when a concurrent registration wins the race.
pub async fn create(pool: &SqlitePool, email: &str, password_hash: &str) -> Result<User> {
    let user = User {
        id: UserId::generate(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now_millis(),
    };

    sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.timestamp_millis())
        .execute(pool)
        .await
        .map_err(|e| StorageError::from_insert(e, "User"))?;

    Ok(user)
}

/// Get all users, ordered by email
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, email, password_hash, created_at FROM users ORDER BY email")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

/// Current time truncated to the millisecond precision stored in the database
pub(crate) fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
