//! Storage traits for credentials and notes

use crate::error::Result;
use crate::types::{CreateNote, Note, NoteId, User, UserId};
use async_trait::async_trait;

/// User identity and password hash persistence
///
/// Implementations must enforce global uniqueness of `email` and report a
/// violation as [`NotesError::Conflict`](crate::NotesError::Conflict).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact-match lookup by email; `None` on miss
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Lookup by primary key; `None` on miss
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>>;

    /// Create a user with an already hashed password
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User>;

    /// All users, ordered by email
    async fn get_all_users(&self) -> Result<Vec<User>>;
}

/// Note persistence, always scoped to an owning user
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes whose author is `owner`, newest first
    async fn list_notes_by_owner(&self, owner: &UserId) -> Result<Vec<Note>>;

    /// Persist a new note with a server-assigned id and creation time
    async fn create_note(&self, note: CreateNote) -> Result<Note>;

    /// Note by id, only if owned by `owner`
    async fn get_note(&self, id: &NoteId, owner: &UserId) -> Result<Option<Note>>;

    /// Delete a note owned by `owner`
    ///
    /// Fails with [`NotesError::NotFound`](crate::NotesError::NotFound) when
    /// no such note exists for that owner.
    async fn delete_note(&self, id: &NoteId, owner: &UserId) -> Result<()>;
}
