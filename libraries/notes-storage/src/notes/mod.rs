//! Note queries
//!
//! Every read and delete is filtered by `author_id`. A note owned by another
//! user is indistinguishable from a missing one.

use crate::error::{Result, StorageError};
use crate::users::now_millis;
use chrono::{DateTime, Utc};
use notes_core::types::{CreateNote, Note, NoteId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn note_from_row(row: &SqliteRow) -> Result<Note> {
    let created_at: i64 = row.try_get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_at)
        .ok_or_else(|| StorageError::CorruptRow(format!("notes.created_at = {created_at}")))?;

    Ok(Note {
        id: NoteId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author_id: UserId::new(row.try_get::<String, _>("author_id")?),
        created_at,
    })
}

/// Get a user's notes, newest first
///
/// `rowid` breaks ties between notes created within the same millisecond.
pub async fn list_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Note>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, content, author_id, created_at
        FROM notes
        WHERE author_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(note_from_row).collect()
}

/// Create a note
///
/// The id and `created_at` are assigned here. The foreign key on
/// `author_id` rejects an author that does not exist, reported as a
/// missing `User`.
pub async fn create(pool: &SqlitePool, note: CreateNote) -> Result<Note> {
    let note = Note {
        id: NoteId::generate(),
        title: note.title,
        content: note.content,
        author_id: note.author_id,
        created_at: now_millis(),
    };

    sqlx::query(
        r#"
        INSERT INTO notes (id, title, content, author_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(note.id.as_str())
    .bind(&note.title)
    .bind(&note.content)
    .bind(note.author_id.as_str())
    .bind(note.created_at.timestamp_millis())
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_note_insert(e, &note.author_id))?;

    Ok(note)
}

/// Get a note by ID (with ownership check)
pub async fn get_by_id(pool: &SqlitePool, id: &NoteId, owner: &UserId) -> Result<Option<Note>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, content, author_id, created_at
        FROM notes
        WHERE id = ? AND author_id = ?
        "#,
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(note_from_row).transpose()
}

/// Delete a note (with ownership check)
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] if no note with this id belongs to `owner`.
pub async fn delete_by_id(pool: &SqlitePool, id: &NoteId, owner: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ? AND author_id = ?")
        .bind(id.as_str())
        .bind(owner.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Note", id.as_str()));
    }

    Ok(())
}
