use crate::catalog::Catalog;
use crate::types::Book;

/// Books revealed per "load more" step
pub const DEFAULT_BOOKS_PER_LOAD: usize = 9;

/// Category selection for the catalog grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `all` (or blank) selects everything, anything else is a category key
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "all" {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(key) => key,
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::All => true,
            Self::Category(key) => &book.category == key,
        }
    }
}

/// Filter plus incremental "load more" window over the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    filter: CategoryFilter,
    visible: usize,
    per_load: usize,
}

/// What the grid shows for the current browse state
#[derive(Debug)]
pub struct Listing<'a> {
    pub books: Vec<&'a Book>,
    /// Size of the filtered list before windowing
    pub total: usize,
    pub has_more: bool,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKS_PER_LOAD)
    }
}

impl BrowseState {
    pub fn new(per_load: usize) -> Self {
        let per_load = per_load.max(1);
        Self {
            filter: CategoryFilter::All,
            visible: per_load,
            per_load,
        }
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Switch category; the window shrinks back to one page
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.visible = self.per_load;
    }

    pub fn load_more(&mut self) {
        self.visible += self.per_load;
    }

    pub fn listing<'a>(&self, catalog: &'a Catalog) -> Listing<'a> {
        let filtered = catalog.filter(&self.filter);
        let total = filtered.len();
        let books: Vec<&Book> = filtered.into_iter().take(self.visible).collect();

        Listing {
            books,
            total,
            has_more: self.visible < total,
        }
    }
}
