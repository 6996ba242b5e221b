pub mod book_modal;
pub mod catalog;
pub mod log_panel;
pub mod reader;
pub mod search;

pub use book_modal::show_book_modal;
pub use catalog::{CatalogView, show_catalog};
pub use log_panel::show_log_panel;
pub use reader::{PageView, show_reader};
pub use search::{SearchOverlay, show_search_overlay};

use library_catalog::{BookId, CategoryFilter};
use reader_runtime::ReaderAction;

/// What the user asked for while a view was drawn; handled by the app after the frame's views run
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Show the details modal
    SelectBook(BookId),
    CloseBookModal,
    ReadBook(BookId),
    DownloadBook(BookId),
    ToggleFavorite(BookId),
    SetFilter(CategoryFilter),
    LoadMore,
    ShowView(CatalogView),
    OpenSearch,
    CloseSearch,
    RunSearch(String),
    Reader(ReaderAction),
}
