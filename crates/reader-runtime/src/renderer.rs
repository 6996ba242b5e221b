use library_catalog::BookId;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Book {0} not found")]
    BookNotFound(BookId),
    #[error("No PDF file is available for book {0}")]
    Unavailable(BookId),
    #[error("Failed to load document: {0}")]
    Load(String),
    #[error("Failed to render page: {0}")]
    Render(String),
    #[error("Not a page number: {0:?}")]
    InvalidPage(String),
    #[error("Page {page} is outside 1..={total}")]
    PageOutOfRange { page: u32, total: u32 },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ReaderError {
    /// Message shown to the reader
    pub fn user_message(&self) -> String {
        match self {
            ReaderError::BookNotFound(_) => "عذراً، لم يتم العثور على الكتاب!".to_string(),
            ReaderError::Unavailable(_) => "عذراً، ملف PDF غير متوفر لهذا الكتاب حالياً.".to_string(),
            ReaderError::Load(_) => {
                "عذراً، حدث خطأ في تحميل الكتاب.\nتأكد من وجود ملف PDF في المسار الصحيح.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;

/// RGBA pixels of one rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub rgba_data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// The external page renderer.
///
/// Calls are blocking and run on the worker's blocking pool. Pages are
/// 0-indexed here; `scale` 1.0 maps one PDF point to one pixel.
pub trait DocumentRenderer: Send + Sync + 'static {
    fn page_count(&self, path: &Path) -> Result<u32>;

    fn render_page(&self, path: &Path, page_index: u32, scale: f32) -> Result<RenderedPage>;
}
