/// Note domain type
use super::{NoteId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A personal note, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Owner; set from the caller's session at creation and never changed
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}
