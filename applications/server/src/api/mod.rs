/// API route modules
pub mod auth;
pub mod extract;
pub mod health;
pub mod notes;
pub mod registration;

use crate::{error::ServerError, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// The remote procedures exposed under `/api`
///
/// The router is built from this closed set, so a procedure cannot be
/// reachable without also declaring whether it needs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    RegisterUser,
    Login,
    RefreshToken,
    GetSession,
    GetNotes,
    GetNoteById,
    CreateNote,
    DeleteNote,
}

impl Procedure {
    pub const ALL: [Procedure; 8] = [
        Procedure::RegisterUser,
        Procedure::Login,
        Procedure::RefreshToken,
        Procedure::GetSession,
        Procedure::GetNotes,
        Procedure::GetNoteById,
        Procedure::CreateNote,
        Procedure::DeleteNote,
    ];

    /// Dotted procedure name, e.g. `note.getNotes`
    pub fn name(self) -> &'static str {
        match self {
            Procedure::RegisterUser => "registration.registerUser",
            Procedure::Login => "auth.login",
            Procedure::RefreshToken => "auth.refresh",
            Procedure::GetSession => "auth.session",
            Procedure::GetNotes => "note.getNotes",
            Procedure::GetNoteById => "note.getNoteById",
            Procedure::CreateNote => "note.createNote",
            Procedure::DeleteNote => "note.deleteNote",
        }
    }

    /// Route path relative to `/api`
    pub fn path(self) -> String {
        format!("/{}", self.name())
    }

    pub fn requires_auth(self) -> bool {
        match self {
            Procedure::RegisterUser | Procedure::Login | Procedure::RefreshToken => false,
            Procedure::GetSession
            | Procedure::GetNotes
            | Procedure::GetNoteById
            | Procedure::CreateNote
            | Procedure::DeleteNote => true,
        }
    }

    fn method_router(self) -> MethodRouter<AppState> {
        match self {
            Procedure::RegisterUser => post(registration::register_user),
            Procedure::Login => post(auth::login),
            Procedure::RefreshToken => post(auth::refresh),
            Procedure::GetSession => get(auth::session),
            Procedure::GetNotes => get(notes::get_notes),
            Procedure::GetNoteById => get(notes::get_note_by_id),
            Procedure::CreateNote => post(notes::create_note),
            Procedure::DeleteNote => post(notes::delete_note),
        }
    }
}

/// Build the complete application router
pub fn router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let mut public_routes = Router::new().route("/health", get(health::health));

    // Protected routes (auth required)
    let mut protected_routes = Router::new();

    for procedure in Procedure::ALL {
        if procedure.requires_auth() {
            protected_routes = protected_routes.route(&procedure.path(), procedure.method_router());
        } else {
            public_routes = public_routes.route(&procedure.path(), procedure.method_router());
        }
    }

    let protected_routes = protected_routes.layer(axum_middleware::from_fn_with_state(
        Arc::clone(&app_state.auth_service),
        middleware::auth_middleware,
    ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(unknown_procedure)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn unknown_procedure() -> ServerError {
    ServerError::NotFound("Unknown procedure".to_string())
}
