//! Notes Server Library
//!
//! Multi-user personal notes server: credential registration and login,
//! session tokens, and owner-scoped note procedures.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::{router, Procedure};
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AccountService, AuthService, NoteService};
pub use state::AppState;
