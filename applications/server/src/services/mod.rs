/// Server services
pub mod accounts;
pub mod auth;
pub mod notes;

pub use accounts::{AccountService, RefreshedSession, SessionIdentity};
pub use auth::AuthService;
pub use notes::NoteService;
