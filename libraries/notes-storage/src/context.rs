use crate::{notes, users};
use async_trait::async_trait;
use notes_core::{
    error::Result,
    storage::{CredentialStore, NoteRepository},
    types::*,
};
use sqlx::SqlitePool;

/// `SQLite`-backed implementation of both storage traits
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open `database_url`, apply migrations and wrap the pool
    pub async fn connect(database_url: &str, max_connections: u32) -> crate::error::Result<Self> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the database is reachable
    pub async fn ping(&self) -> crate::error::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for Database {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(users::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::find_by_id(&self.pool, id).await?)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        Ok(users::create(&self.pool, email, password_hash).await?)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }
}

#[async_trait]
impl NoteRepository for Database {
    async fn list_notes_by_owner(&self, owner: &UserId) -> Result<Vec<Note>> {
        Ok(notes::list_by_owner(&self.pool, owner).await?)
    }

    async fn create_note(&self, note: CreateNote) -> Result<Note> {
        Ok(notes::create(&self.pool, note).await?)
    }

    async fn get_note(&self, id: &NoteId, owner: &UserId) -> Result<Option<Note>> {
        Ok(notes::get_by_id(&self.pool, id, owner).await?)
    }

    async fn delete_note(&self, id: &NoteId, owner: &UserId) -> Result<()> {
        Ok(notes::delete_by_id(&self.pool, id, owner).await?)
    }
}
