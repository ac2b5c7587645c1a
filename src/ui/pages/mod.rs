//! Application pages
//!
//! - Home: login form, or the editor once signed in
//! - Not found

mod editor;
mod home;
mod not_found;

pub use editor::EditorPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
