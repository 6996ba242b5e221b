//! Document checks for catalog maintenance

use crate::catalog::Catalog;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// The book has no document reference
    NoDocument,
    Missing(PathBuf),
    Loaded { page_count: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifyReport {
    pub book_id: BookId,
    pub title: String,
    pub declared_pages: u32,
    pub outcome: VerifyOutcome,
}

impl VerifyReport {
    /// Loaded, and the real page count equals the declared one
    pub fn is_consistent(&self) -> bool {
        matches!(
            self.outcome,
            VerifyOutcome::Loaded { page_count } if page_count == self.declared_pages as usize
        )
    }
}

/// Count the pages of a PDF file
pub async fn count_pages(path: impl AsRef<Path>) -> Result<usize> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc.get_pages().len())
}

pub async fn verify_book(catalog: &Catalog, book: &Book) -> VerifyReport {
    let outcome = match catalog.document_path(book) {
        None => VerifyOutcome::NoDocument,
        Some(path) if !path.exists() => VerifyOutcome::Missing(path),
        Some(path) => match count_pages(&path).await {
            Ok(page_count) => VerifyOutcome::Loaded { page_count },
            Err(e) => VerifyOutcome::Failed(e.to_string()),
        },
    };

    VerifyReport {
        book_id: book.id,
        title: book.title.clone(),
        declared_pages: book.pages,
        outcome,
    }
}

pub async fn verify_catalog(catalog: &Catalog) -> Vec<VerifyReport> {
    let mut reports = Vec::with_capacity(catalog.len());
    for book in catalog.books() {
        reports.push(verify_book(catalog, book).await);
    }
    reports
}
