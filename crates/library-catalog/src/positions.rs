use crate::store::KeyValueStore;
use crate::types::BookId;

/// Page a book opens at when nothing usable is stored
pub const FIRST_PAGE: u32 = 1;

/// Storage key for a book's last viewed page
pub fn page_key(book_id: BookId) -> String {
    format!("book_{}_page", book_id)
}

/// Last-viewed page per book
#[derive(Debug, Clone)]
pub struct ReadingPositions<S> {
    store: S,
}

impl<S: KeyValueStore> ReadingPositions<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record the page; storage failures are logged and dropped
    pub fn save(&self, book_id: BookId, page: u32) {
        if let Err(e) = self.store.set(&page_key(book_id), &page.to_string()) {
            log::warn!("Failed to save reading position for book {}: {}", book_id, e);
        }
    }

    /// Stored page if it is a positive integer
    pub fn stored(&self, book_id: BookId) -> Option<u32> {
        self.store
            .get(&page_key(book_id))
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|&page| page >= FIRST_PAGE)
    }

    pub fn load(&self, book_id: BookId) -> u32 {
        self.stored(book_id).unwrap_or(FIRST_PAGE)
    }

    pub fn forget(&self, book_id: BookId) {
        if let Err(e) = self.store.remove(&page_key(book_id)) {
            log::warn!("Failed to clear reading position for book {}: {}", book_id, e);
        }
    }
}
