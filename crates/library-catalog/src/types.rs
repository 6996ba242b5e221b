use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
    #[error("Duplicate book id {0}")]
    DuplicateId(BookId),
    #[error("Book {0} not found")]
    BookNotFound(BookId),
    #[error("No PDF file is available for book {0}")]
    Unavailable(BookId),
    #[error("Unable to resolve a local data directory")]
    NoDataDirectory,
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog-wide unique book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog entry.
///
/// Field names serialize in camelCase so catalogs exported from the web
/// version of the library (`booksData`) load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Category key used for filtering (e.g. `tafsir`)
    pub category: String,
    /// Category label shown to readers (e.g. `التفسير`)
    pub category_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover: String,
    /// Declared page count, shown on cards
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub publish_year: i32,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub pdf_file: Option<String>,
}

impl Book {
    /// Document reference, treating an empty string as absent
    pub fn document(&self) -> Option<&str> {
        self.pdf_file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    pub fn has_document(&self) -> bool {
        self.document().is_some()
    }
}
