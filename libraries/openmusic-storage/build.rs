//! Build script for openmusic-storage.
//!
//! Rebuilds the crate when a migration changes, since they are embedded with
//! `sqlx::migrate!`.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
