/// Shared application state
use crate::services::{AccountService, AuthService, NoteService};
use notes_core::{CredentialStore, NoteRepository};
use notes_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub accounts: AccountService,
    pub notes: NoteService,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth_service: Arc<AuthService>) -> Self {
        let store: Arc<dyn CredentialStore> = db.clone();
        let repo: Arc<dyn NoteRepository> = db.clone();

        Self {
            accounts: AccountService::new(Arc::clone(&store), Arc::clone(&auth_service)),
            notes: NoteService::new(repo, store),
            db,
            auth_service,
        }
    }
}
