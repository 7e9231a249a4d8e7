mod ids;
mod note;
mod user;

pub use ids::{NoteId, UserId};
pub use note::{CreateNote, Note};
pub use user::{User, UserInfo};
