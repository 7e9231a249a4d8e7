//! Build script for notes-storage.
//!
//! `sqlx::migrate!` embeds the SQL files at compile time, so edits to
//! `migrations/` must trigger a rebuild.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
