/// Note service - owner-scoped note operations
use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use notes_core::{
    validation::{NoteForm, NoteIdInput},
    CreateNote, CredentialStore, Note, NoteId, NoteRepository, Validate,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    users: Arc<dyn CredentialStore>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>, users: Arc<dyn CredentialStore>) -> Self {
        Self { repo, users }
    }

    /// Caller's notes, newest first
    pub async fn get_notes(&self, caller: &AuthenticatedUser) -> Result<Vec<Note>> {
        Ok(self.repo.list_notes_by_owner(caller.user_id()).await?)
    }

    /// A single note owned by the caller
    ///
    /// Another user's note is reported exactly like a missing one.
    pub async fn get_note_by_id(
        &self,
        caller: &AuthenticatedUser,
        input: NoteIdInput,
    ) -> Result<Note> {
        let id = NoteId::new(input.id);
        self.repo
            .get_note(&id, caller.user_id())
            .await?
            .ok_or_else(|| ServerError::NotFound("Note not found".to_string()))
    }

    /// Create a note authored by the caller
    pub async fn create_note(&self, caller: &AuthenticatedUser, form: NoteForm) -> Result<Note> {
        form.validate()?;

        // The token can outlive its user
        if self.users.find_user_by_id(caller.user_id()).await?.is_none() {
            return Err(ServerError::NotFound("User not found".to_string()));
        }

        let note = self
            .repo
            .create_note(CreateNote {
                title: form.title,
                content: form.content,
                author_id: caller.user_id().clone(),
            })
            .await?;

        tracing::info!("User {} created note {}", caller.user_id(), note.id);

        Ok(note)
    }

    /// Delete a note owned by the caller
    pub async fn delete_note(&self, caller: &AuthenticatedUser, input: NoteIdInput) -> Result<()> {
        let id = NoteId::new(input.id);
        self.repo.delete_note(&id, caller.user_id()).await?;

        tracing::info!("User {} deleted note {}", caller.user_id(), id);

        Ok(())
    }
}
