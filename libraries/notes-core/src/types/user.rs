/// User domain type
use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full user record as stored, including the password hash
///
/// Not `Serialize`; anything leaving the server goes through [`User::to_info`].
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login email, globally unique
    pub email: String,

    /// One-way salted password hash
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Project to the externally visible representation (no password hash)
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User information safe to send to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
