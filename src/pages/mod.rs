mod home;
mod not_found;
mod notes;

pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use notes::NotesPage;

/// Unfiltered notes list.
pub(crate) const ALL_NOTES_PATH: &str = "/notes/filter/All";
