/// Note API routes
///
/// All handlers sit behind the auth middleware and act only on the caller's notes.
use super::extract::{JsonBody, QueryParams};
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use notes_core::{
    validation::{NoteForm, NoteIdInput},
    Note,
};

/// GET /api/note.getNotes
pub async fn get_notes(
    State(app_state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<Json<Vec<Note>>> {
    let notes = app_state.notes.get_notes(&caller).await?;
    Ok(Json(notes))
}

/// GET /api/note.getNoteById?id=
pub async fn get_note_by_id(
    State(app_state): State<AppState>,
    caller: AuthenticatedUser,
    QueryParams(input): QueryParams<NoteIdInput>,
) -> Result<Json<Note>> {
    let note = app_state.notes.get_note_by_id(&caller, input).await?;
    Ok(Json(note))
}

/// POST /api/note.createNote
pub async fn create_note(
    State(app_state): State<AppState>,
    caller: AuthenticatedUser,
    JsonBody(form): JsonBody<NoteForm>,
) -> Result<(StatusCode, Json<Note>)> {
    let note = app_state.notes.create_note(&caller, form).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// POST /api/note.deleteNote
pub async fn delete_note(
    State(app_state): State<AppState>,
    caller: AuthenticatedUser,
    JsonBody(input): JsonBody<NoteIdInput>,
) -> Result<StatusCode> {
    app_state.notes.delete_note(&caller, input).await?;
    Ok(StatusCode::NO_CONTENT)
}
