use crate::browse::CategoryFilter;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// The in-memory book list plus the directory document paths resolve against
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    root: PathBuf,
}

/// Number of books in one category, in first-appearance order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub key: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStatistics {
    pub total_books: usize,
    pub total_authors: usize,
    pub total_downloads: u64,
}

impl LibraryStatistics {
    pub fn books_label(&self) -> String {
        format!("{}+", self.total_books)
    }

    pub fn authors_label(&self) -> String {
        format!("{}+", self.total_authors)
    }

    /// Downloads in thousands, e.g. `12K+`
    pub fn downloads_label(&self) -> String {
        let thousands = (self.total_downloads as f64 / 1000.0).round();
        format!("{}K+", thousands as u64)
    }
}

/// Digits grouped in threes, e.g. `12,500`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(books: Vec<Book>) -> Result<Self> {
        let mut seen = HashSet::new();
        for book in &books {
            if !seen.insert(book.id) {
                return Err(CatalogError::DuplicateId(book.id));
            }
        }

        Ok(Self {
            books,
            root: PathBuf::from("."),
        })
    }

    /// Set the directory relative document and cover paths resolve against
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Load a catalog from a `.json` array or a `.csv` table
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let bytes = tokio::fs::read(&path).await?;

        let books = match extension.as_str() {
            "json" => parse_json(&bytes)?,
            "csv" => tokio::task::spawn_blocking(move || parse_csv(&bytes)).await??,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        log::info!("Loaded {} books from {}", books.len(), path.display());
        Ok(Self::new(books)?.with_root(root))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Resolve the book's document reference to a filesystem path
    pub fn document_path(&self, book: &Book) -> Option<PathBuf> {
        book.document().map(|doc| self.resolve(doc))
    }

    pub fn cover_path(&self, book: &Book) -> Option<PathBuf> {
        let cover = book.cover.trim();
        if cover.is_empty() {
            None
        } else {
            Some(self.resolve(cover))
        }
    }

    fn resolve(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Book> {
        self.books.iter().filter(|book| filter.matches(book)).collect()
    }

    /// Free-text search over title, author, category label and description.
    ///
    /// Returns `None` for a blank term, meaning "show the normal listing".
    pub fn search(&self, term: &str) -> Option<Vec<&Book>> {
        let term = normalize(term);
        if term.is_empty() {
            return None;
        }

        Some(
            self.books
                .iter()
                .filter(|book| {
                    contains(&book.title, &term)
                        || contains(&book.author, &term)
                        || contains(&book.category_name, &term)
                        || contains(&book.description, &term)
                })
                .collect(),
        )
    }

    /// Quick suggestions matching title or author; terms under two characters yield none
    pub fn suggestions(&self, term: &str, limit: usize) -> Vec<&Book> {
        let term = normalize(term);
        if term.chars().count() < 2 {
            return Vec::new();
        }

        self.books
            .iter()
            .filter(|book| contains(&book.title, &term) || contains(&book.author, &term))
            .take(limit)
            .collect()
    }

    pub fn category_count(&self, key: &str) -> usize {
        self.books.iter().filter(|book| book.category == key).count()
    }

    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<CategoryCount> = Vec::new();

        for book in &self.books {
            match index.get(book.category.as_str()) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(&book.category, counts.len());
                    counts.push(CategoryCount {
                        key: book.category.clone(),
                        name: book.category_name.clone(),
                        count: 1,
                    });
                }
            }
        }

        counts
    }

    pub fn statistics(&self) -> LibraryStatistics {
        let authors: HashSet<&str> = self.books.iter().map(|b| b.author.as_str()).collect();

        LibraryStatistics {
            total_books: self.books.len(),
            total_authors: authors.len(),
            total_downloads: self.books.iter().map(|b| b.downloads).sum(),
        }
    }
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

fn contains(haystack: &str, normalized_term: &str) -> bool {
    haystack.to_lowercase().contains(normalized_term)
}

pub fn parse_json(bytes: &[u8]) -> Result<Vec<Book>> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Book>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut books = Vec::new();

    for record in reader.deserialize() {
        let book: Book = record?;
        books.push(book);
    }

    Ok(books)
}
