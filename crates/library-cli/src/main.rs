mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use library_catalog::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "maktaba", about = "Arabic e-book library catalog", version)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (JSON or CSV), overrides the configuration
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory for saved reading positions and favorites
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print log messages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books, one "load more" window at a time
    List {
        /// Category key, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Number of windows to show
        #[arg(long, default_value = "1")]
        windows: usize,
    },

    /// Search titles, authors, categories and descriptions
    Search { term: String },

    /// Title and author suggestions for a partial query
    Suggest { term: String },

    /// Show one book in detail
    Show { id: u64 },

    /// Category cards with book counts
    Categories,

    /// Library statistics banner
    Stats,

    /// Add or remove a book from favorites
    Favorite { id: u64 },

    /// List favorite books
    Favorites,

    /// Show or change the saved reading position of a book
    Progress {
        id: u64,

        /// Save this page as the last page read
        #[arg(long, conflicts_with = "reset")]
        set: Option<u32>,

        /// Forget the saved page
        #[arg(long)]
        reset: bool,
    },

    /// Save a copy of a book's PDF as "<title>.pdf"
    Download {
        id: u64,

        /// Destination directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Check every catalog document and compare page counts
    Verify,

    /// Generate a sample book PDF for trying out the reader
    SamplePdf {
        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of pages
        #[arg(long, default_value = "10")]
        pages: usize,

        /// Title printed on every page
        #[arg(long)]
        title: Option<String>,
    },
}

struct Library {
    config: LibraryConfig,
}

impl Library {
    async fn catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.config.catalog_path)
            .await
            .with_context(|| format!("Failed to load catalog {}", self.config.catalog_path.display()))
    }

    fn store(&self) -> Result<Arc<JsonFileStore>> {
        let path = self.config.storage_path()?;
        let store = JsonFileStore::open(&path)
            .with_context(|| format!("Failed to open storage {}", path.display()))?;
        Ok(Arc::new(store))
    }
}

fn print_book(book: &Book) {
    let badge = book
        .badge
        .as_deref()
        .map(|b| format!(" [{}]", b))
        .unwrap_or_default();
    let availability = if book.has_document() { "" } else { " (PDF unavailable)" };
    println!(
        "{:>4}  {} | {} | {}{}{}",
        book.id.0, book.title, book.author, book.category_name, badge, availability
    );
}

fn lookup(catalog: &Catalog, id: u64) -> Result<&Book> {
    catalog
        .get(BookId(id))
        .ok_or_else(|| CatalogError::BookNotFound(BookId(id)).into())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        logger::StderrLogger::init(log::Level::Debug)?;
    }

    let mut config = LibraryConfig::load_or_default(cli.config.as_deref()).await?;
    if let Some(catalog) = cli.catalog {
        config.catalog_path = catalog;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }
    config.validate()?;

    let library = Library { config };

    match cli.command {
        Commands::List { category, windows } => {
            let catalog = library.catalog().await?;
            let mut browse = BrowseState::new(library.config.books_per_load);
            browse.set_filter(CategoryFilter::parse(&category));
            for _ in 1..windows.max(1) {
                browse.load_more();
            }

            let listing = browse.listing(&catalog);
            for book in &listing.books {
                print_book(book);
            }
            println!("Showing {} of {} books", listing.books.len(), listing.total);
            if listing.has_more {
                println!("Use --windows {} to load more", windows.max(1) + 1);
            }
        }

        Commands::Search { term } => {
            let catalog = library.catalog().await?;
            match catalog.search(&term) {
                None => bail!("Search term is empty"),
                Some(results) if results.is_empty() => println!("No results for \"{}\"", term.trim()),
                Some(results) => {
                    println!("{} results for \"{}\"", results.len(), term.trim());
                    for book in results {
                        print_book(book);
                    }
                }
            }
        }

        Commands::Suggest { term } => {
            let catalog = library.catalog().await?;
            for book in catalog.suggestions(&term, library.config.suggestion_limit) {
                println!("{:>4}  {} | {}", book.id.0, book.title, book.author);
            }
        }

        Commands::Show { id } => {
            let catalog = library.catalog().await?;
            let book = lookup(&catalog, id)?;
            let store = library.store()?;
            let positions = ReadingPositions::new(store.clone());
            let favorites = Favorites::new(store);

            println!("{}", book.title);
            println!("  Author:     {}", book.author);
            println!("  Category:   {} ({})", book.category_name, book.category);
            println!("  Publisher:  {} ({})", book.publisher, book.publish_year);
            println!("  Pages:      {}", book.pages);
            println!(
                "  Rating:     {} {:.1}",
                StarRating::from_rating(book.rating).symbols(),
                book.rating
            );
            println!("  Downloads:  {}", book.downloads);
            if let Some(badge) = &book.badge {
                println!("  Badge:      {}", badge);
            }
            match catalog.document_path(book) {
                Some(path) => println!("  Document:   {}", path.display()),
                None => println!("  Document:   unavailable"),
            }
            if let Some(page) = positions.stored(book.id) {
                println!("  Last page:  {}", page);
            }
            if favorites.is_favorite(book.id) {
                println!("  In favorites");
            }
            if !book.description.is_empty() {
                println!();
                println!("{}", book.description);
            }
        }

        Commands::Categories => {
            let catalog = library.catalog().await?;
            for category in catalog.category_counts() {
                println!("{:<12} {:<16} {} books", category.key, category.name, category.count);
            }
        }

        Commands::Stats => {
            let catalog = library.catalog().await?;
            let stats = catalog.statistics();
            println!("Books:     {}", stats.books_label());
            println!("Authors:   {}", stats.authors_label());
            println!("Downloads: {}", stats.downloads_label());
        }

        Commands::Favorite { id } => {
            let catalog = library.catalog().await?;
            let book = lookup(&catalog, id)?;
            let favorites = Favorites::new(library.store()?);
            if favorites.toggle(book.id)? {
                println!("Added \"{}\" to favorites", book.title);
            } else {
                println!("Removed \"{}\" from favorites", book.title);
            }
        }

        Commands::Favorites => {
            let catalog = library.catalog().await?;
            let favorites = Favorites::new(library.store()?);
            let ids = favorites.list();
            if ids.is_empty() {
                println!("No favorites yet");
            }
            for id in ids {
                match catalog.get(id) {
                    Some(book) => print_book(book),
                    None => println!("{:>4}  (no longer in the catalog)", id.0),
                }
            }
        }

        Commands::Progress { id, set, reset } => {
            let catalog = library.catalog().await?;
            let book = lookup(&catalog, id)?;
            let positions = ReadingPositions::new(library.store()?);

            if reset {
                positions.forget(book.id);
            } else if let Some(page) = set {
                if page == 0 {
                    bail!("Pages start at 1");
                }
                positions.save(book.id, page);
            }

            match positions.stored(book.id) {
                Some(page) => println!("{}: page {} of {}", book.title, page, book.pages),
                None => println!("{}: not started", book.title),
            }
        }

        Commands::Download { id, output } => {
            let catalog = library.catalog().await?;
            println!("جاري التحميل...");
            let path = download_book(&catalog, BookId(id), &output).await?;
            println!("تم التحميل بنجاح! {}", path.display());
        }

        Commands::Verify => {
            let catalog = library.catalog().await?;
            let reports = verify_catalog(&catalog).await;
            let mut problems = 0;

            for report in &reports {
                let status = match &report.outcome {
                    VerifyOutcome::NoDocument => "no document".to_string(),
                    VerifyOutcome::Missing(path) => format!("missing {}", path.display()),
                    VerifyOutcome::Loaded { page_count } if report.is_consistent() => {
                        format!("ok, {} pages", page_count)
                    }
                    VerifyOutcome::Loaded { page_count } => format!(
                        "{} pages, catalog says {}",
                        page_count, report.declared_pages
                    ),
                    VerifyOutcome::Failed(message) => format!("unreadable: {}", message),
                };
                if matches!(
                    report.outcome,
                    VerifyOutcome::Missing(_) | VerifyOutcome::Failed(_)
                ) {
                    problems += 1;
                }
                println!("{:>4}  {} | {}", report.book_id.0, report.title, status);
            }

            if problems > 0 {
                bail!("{} of {} documents could not be read", problems, reports.len());
            }
        }

        Commands::SamplePdf {
            output,
            pages,
            title,
        } => {
            let mut options = SampleBookOptions {
                page_count: pages,
                ..Default::default()
            };
            if let Some(title) = title {
                options.title = title;
            }
            generate_sample_book(&options, &output).await?;
            println!("Generated {} pages → {}", pages, output.display());
        }
    }

    Ok(())
}
