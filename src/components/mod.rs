pub mod modal;
pub mod note_form;
pub mod note_list;
pub mod pagination;
pub mod search_box;
pub mod toaster;
pub mod ui;

pub use modal::Modal;
pub use note_form::NoteForm;
pub use note_list::NoteList;
pub use pagination::Pagination;
pub use search_box::SearchBox;
pub use toaster::Toaster;
