use crate::catalog::Catalog;
use crate::types::*;
use std::path::{Path, PathBuf};

/// `<title>.pdf`, with characters that are unsafe in file names replaced
pub fn download_file_name(book: &Book) -> String {
    let title: String = book
        .title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if title.is_empty() {
        format!("book-{}.pdf", book.id)
    } else {
        format!("{}.pdf", title)
    }
}

/// Source document and default destination for downloading a book into `dest_dir`
pub fn plan_download(catalog: &Catalog, book_id: BookId, dest_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let book = catalog
        .get(book_id)
        .ok_or(CatalogError::BookNotFound(book_id))?;
    let source = catalog
        .document_path(book)
        .ok_or(CatalogError::Unavailable(book_id))?;

    Ok((source, dest_dir.join(download_file_name(book))))
}

/// Copy a document to its destination, creating parent directories
pub async fn copy_document(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<u64> {
    let destination = destination.as_ref();
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(tokio::fs::copy(source, destination).await?)
}

/// Copy a book's PDF into `dest_dir` as `<title>.pdf`
pub async fn download_book(catalog: &Catalog, book_id: BookId, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let (source, destination) = plan_download(catalog, book_id, dest_dir.as_ref())?;
    copy_document(&source, &destination).await?;
    log::info!("Downloaded book {} to {}", book_id, destination.display());
    Ok(destination)
}
