use library_catalog::*;
use std::path::PathBuf;

fn book(id: u64, title: &str, author: &str, category: &str, category_name: &str) -> Book {
    Book {
        id: BookId(id),
        title: title.to_string(),
        author: author.to_string(),
        category: category.to_string(),
        category_name: category_name.to_string(),
        description: String::new(),
        cover: format!("covers/{}.jpg", id),
        pages: 100,
        rating: 4.5,
        downloads: 1000,
        publish_year: 2010,
        publisher: "دار السلام".to_string(),
        badge: None,
        pdf_file: None,
    }
}

fn sample_catalog() -> Catalog {
    let mut books = vec![
        book(1, "تفسير ابن كثير", "ابن كثير", "tafsir", "التفسير"),
        book(2, "صحيح البخاري", "البخاري", "hadith", "الحديث"),
        book(3, "رياض الصالحين", "النووي", "hadith", "الحديث"),
        book(4, "Fiqh Made Easy", "Saleh As-Saleh", "fiqh", "الفقه"),
        book(5, "الأربعون النووية", "النووي", "hadith", "الحديث"),
    ];
    books[0].description = "تفسير القرآن العظيم".to_string();
    books[0].pdf_file = Some("books/tafsir-ibn-kathir.pdf".to_string());
    Catalog::new(books).unwrap()
}

#[test]
fn test_duplicate_ids_rejected() {
    let books = vec![
        book(1, "a", "x", "c", "C"),
        book(1, "b", "y", "c", "C"),
    ];
    match Catalog::new(books) {
        Err(CatalogError::DuplicateId(id)) => assert_eq!(id, BookId(1)),
        other => panic!("Expected DuplicateId, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn test_lookup_and_document_resolution() {
    let catalog = sample_catalog().with_root("/srv/library");

    let tafsir = catalog.get(BookId(1)).unwrap();
    assert_eq!(
        catalog.document_path(tafsir),
        Some(PathBuf::from("/srv/library/books/tafsir-ibn-kathir.pdf"))
    );

    let bukhari = catalog.get(BookId(2)).unwrap();
    assert!(!bukhari.has_document());
    assert_eq!(catalog.document_path(bukhari), None);

    assert!(catalog.get(BookId(99)).is_none());
}

#[test]
fn test_blank_document_reference_is_unavailable() {
    let mut b = book(7, "t", "a", "c", "C");
    b.pdf_file = Some("   ".to_string());
    assert!(!b.has_document());
}

#[test]
fn test_category_filter() {
    let catalog = sample_catalog();

    assert_eq!(catalog.filter(&CategoryFilter::All).len(), 5);

    let hadith = catalog.filter(&CategoryFilter::parse("hadith"));
    let ids: Vec<u64> = hadith.iter().map(|b| b.id.0).collect();
    assert_eq!(ids, vec![2, 3, 5]);

    assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("fiqh").key(), "fiqh");
}

#[test]
fn test_search_matches_all_text_fields() {
    let catalog = sample_catalog();

    // Title
    let hits = catalog.search("البخاري").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, BookId(2));

    // Author, several books
    assert_eq!(catalog.search("النووي").unwrap().len(), 2);

    // Category display name
    assert_eq!(catalog.search("الفقه").unwrap().len(), 1);

    // Description
    assert_eq!(catalog.search("القرآن").unwrap()[0].id, BookId(1));

    // Case-insensitive and trimmed
    assert_eq!(catalog.search("  fiqh MADE ").unwrap()[0].id, BookId(4));

    assert!(catalog.search("لا يوجد").unwrap().is_empty());
}

#[test]
fn test_blank_search_returns_to_listing() {
    let catalog = sample_catalog();
    assert!(catalog.search("").is_none());
    assert!(catalog.search("   ").is_none());
}

#[test]
fn test_suggestions() {
    let catalog = sample_catalog();

    assert!(catalog.suggestions("ا", 5).is_empty());
    assert!(catalog.suggestions(" f ", 5).is_empty());

    let hits = catalog.suggestions("النووي", 5);
    assert_eq!(hits.len(), 2);

    let limited = catalog.suggestions("ال", 1);
    assert_eq!(limited.len(), 1);
}

#[test]
fn test_category_counts() {
    let catalog = sample_catalog();
    let counts = catalog.category_counts();

    assert_eq!(
        counts,
        vec![
            CategoryCount {
                key: "tafsir".into(),
                name: "التفسير".into(),
                count: 1
            },
            CategoryCount {
                key: "hadith".into(),
                name: "الحديث".into(),
                count: 3
            },
            CategoryCount {
                key: "fiqh".into(),
                name: "الفقه".into(),
                count: 1
            },
        ]
    );
    assert_eq!(catalog.category_count("hadith"), 3);
    assert_eq!(catalog.category_count("seerah"), 0);
}

#[test]
fn test_statistics() {
    let catalog = sample_catalog();
    let stats = catalog.statistics();

    assert_eq!(stats.total_books, 5);
    assert_eq!(stats.total_authors, 4);
    assert_eq!(stats.total_downloads, 5000);
    assert_eq!(stats.books_label(), "5+");
    assert_eq!(stats.authors_label(), "4+");
    assert_eq!(stats.downloads_label(), "5K+");

    let rounded = LibraryStatistics {
        total_books: 0,
        total_authors: 0,
        total_downloads: 12_500,
    };
    assert_eq!(rounded.downloads_label(), "13K+");
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(12_500), "12,500");
    assert_eq!(group_thousands(1_234_567), "1,234,567");
}

#[test]
fn test_browse_load_more() {
    let books: Vec<Book> = (1..=20)
        .map(|i| book(i, &format!("كتاب {}", i), "مؤلف", if i % 2 == 0 { "even" } else { "odd" }, "فئة"))
        .collect();
    let catalog = Catalog::new(books).unwrap();

    let mut browse = BrowseState::default();
    let listing = browse.listing(&catalog);
    assert_eq!(listing.books.len(), 9);
    assert_eq!(listing.total, 20);
    assert!(listing.has_more);

    browse.load_more();
    assert_eq!(browse.listing(&catalog).books.len(), 18);

    browse.load_more();
    let listing = browse.listing(&catalog);
    assert_eq!(listing.books.len(), 20);
    assert!(!listing.has_more);

    // Switching category resets the window
    browse.set_filter(CategoryFilter::parse("even"));
    assert_eq!(browse.visible(), 9);
    let listing = browse.listing(&catalog);
    assert_eq!(listing.total, 10);
    assert_eq!(listing.books.len(), 9);
    assert!(listing.books.iter().all(|b| b.category == "even"));
}

#[test]
fn test_download_file_name() {
    let mut b = book(3, "رياض الصالحين", "النووي", "hadith", "الحديث");
    assert_eq!(download_file_name(&b), "رياض الصالحين.pdf");

    b.title = "a/b:c".to_string();
    assert_eq!(download_file_name(&b), "a_b_c.pdf");

    b.title = "  ".to_string();
    assert_eq!(download_file_name(&b), "book-3.pdf");
}

#[test]
fn test_plan_download_requires_document() {
    let catalog = sample_catalog().with_root("/lib");
    let dest = PathBuf::from("/downloads");

    let (source, destination) = plan_download(&catalog, BookId(1), &dest).unwrap();
    assert_eq!(source, PathBuf::from("/lib/books/tafsir-ibn-kathir.pdf"));
    assert_eq!(destination, PathBuf::from("/downloads/تفسير ابن كثير.pdf"));

    assert!(matches!(
        plan_download(&catalog, BookId(2), &dest),
        Err(CatalogError::Unavailable(BookId(2)))
    ));
    assert!(matches!(
        plan_download(&catalog, BookId(42), &dest),
        Err(CatalogError::BookNotFound(BookId(42)))
    ));
}

#[tokio::test]
async fn test_load_json_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let json = r#"[
        {
            "id": 1,
            "title": "تفسير ابن كثير",
            "author": "ابن كثير",
            "category": "tafsir",
            "categoryName": "التفسير",
            "description": "تفسير القرآن العظيم",
            "cover": "covers/1.jpg",
            "pages": 10,
            "rating": 4.8,
            "downloads": 15000,
            "publishYear": 1999,
            "publisher": "دار طيبة",
            "badge": "جديد",
            "pdfFile": "books/tafsir-ibn-kathir.pdf"
        },
        {
            "id": 2,
            "title": "صحيح البخاري",
            "author": "البخاري",
            "category": "hadith",
            "categoryName": "الحديث",
            "pages": 500
        }
    ]"#;
    tokio::fs::write(&path, json).await.unwrap();

    let catalog = Catalog::load(&path).await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.root(), dir.path());

    let tafsir = catalog.get(BookId(1)).unwrap();
    assert_eq!(tafsir.badge.as_deref(), Some("جديد"));
    assert_eq!(tafsir.publish_year, 1999);
    assert_eq!(
        catalog.document_path(tafsir),
        Some(dir.path().join("books/tafsir-ibn-kathir.pdf"))
    );

    let bukhari = catalog.get(BookId(2)).unwrap();
    assert_eq!(bukhari.pdf_file, None);
    assert_eq!(bukhari.downloads, 0);
}

#[tokio::test]
async fn test_load_csv_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    let csv = "id,title,author,category,categoryName,description,cover,pages,rating,downloads,publishYear,publisher,badge,pdfFile\n\
               1,Tafsir,Ibn Kathir,tafsir,Tafsir,Exegesis,covers/1.jpg,10,4.5,1200,1999,Dar Taiba,,books/t.pdf\n\
               2,Riyad,Nawawi,hadith,Hadith,,covers/2.jpg,300,5,800,2001,Dar,new,\n";
    tokio::fs::write(&path, csv).await.unwrap();

    let catalog = Catalog::load(&path).await.unwrap();
    assert_eq!(catalog.len(), 2);

    let first = catalog.get(BookId(1)).unwrap();
    assert_eq!(first.pdf_file.as_deref(), Some("books/t.pdf"));
    assert_eq!(first.badge, None);

    let second = catalog.get(BookId(2)).unwrap();
    assert!(!second.has_document());
    assert_eq!(second.badge.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_unsupported_catalog_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.xml");
    tokio::fs::write(&path, "<books/>").await.unwrap();

    assert!(matches!(
        Catalog::load(&path).await,
        Err(CatalogError::UnsupportedFormat(ext)) if ext == "xml"
    ));
}
