use crate::store::KeyValueStore;
use crate::types::{BookId, Result};

pub const FAVORITES_KEY: &str = "favorites";

/// Favorite books, stored as one JSON array under [`FAVORITES_KEY`]
#[derive(Debug, Clone)]
pub struct Favorites<S> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current list in insertion order; an unreadable value reads as empty
    pub fn list(&self) -> Vec<BookId> {
        let Some(raw) = self.store.get(FAVORITES_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable favorites list: {}", e);
            Vec::new()
        })
    }

    pub fn is_favorite(&self, book_id: BookId) -> bool {
        self.list().contains(&book_id)
    }

    /// Add or remove the book and rewrite the list. Returns the new membership.
    pub fn toggle(&self, book_id: BookId) -> Result<bool> {
        let mut ids = self.list();
        let now_favorite = match ids.iter().position(|&id| id == book_id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(book_id);
                true
            }
        };

        let raw = serde_json::to_string(&ids)?;
        self.store.set(FAVORITES_KEY, &raw)?;
        Ok(now_favorite)
    }
}
