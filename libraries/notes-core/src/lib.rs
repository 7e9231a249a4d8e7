//! Notes Core
//!
//! Core types, storage traits, input validation and error handling for the
//! notes server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserInfo`, `Note`, and their identifiers
//! - **Storage Traits**: `CredentialStore` and `NoteRepository`
//! - **Validation**: input schemas checked at the procedure boundary
//! - **Error Handling**: Unified `NotesError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use notes_core::validation::{NoteForm, Validate};
//!
//! let form = NoteForm {
//!     title: "Groceries".to_string(),
//!     content: "Milk, eggs".to_string(),
//! };
//! assert!(form.validate().is_ok());
//!
//! let empty = NoteForm {
//!     title: String::new(),
//!     content: "Milk, eggs".to_string(),
//! };
//! assert!(empty.validate().is_err());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{NotesError, Result};
pub use storage::{CredentialStore, NoteRepository};
pub use validation::{Validate, ValidationErrors};

pub use types::{CreateNote, Note, NoteId, User, UserId, UserInfo};
