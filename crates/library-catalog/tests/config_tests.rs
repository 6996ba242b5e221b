use library_catalog::*;
use std::path::PathBuf;

#[test]
fn test_defaults_are_valid() {
    let config = LibraryConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.books_per_load, 9);
    assert_eq!(config.suggestion_limit, 5);
    assert_eq!(config.default_zoom, 1.5);
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = LibraryConfig::default();
    config.books_per_load = 0;
    match config.validate() {
        Err(CatalogError::Config(msg)) => assert!(msg.contains("books_per_load")),
        _ => panic!("Expected Config error"),
    }

    let mut config = LibraryConfig::default();
    config.default_zoom = 3.25;
    assert!(config.validate().is_err());

    config.default_zoom = 0.25;
    assert!(config.validate().is_err());

    config.default_zoom = 3.0;
    assert!(config.validate().is_ok());

    let mut config = LibraryConfig::default();
    config.page_cache_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_explicit_data_dir() {
    let mut config = LibraryConfig::default();
    config.data_dir = Some(PathBuf::from("/tmp/maktaba-test"));

    assert_eq!(
        config.storage_path().unwrap(),
        PathBuf::from("/tmp/maktaba-test/storage.json")
    );
}

#[tokio::test]
async fn test_save_and_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maktaba.json");

    let mut config = LibraryConfig::default();
    config.catalog_path = PathBuf::from("books/catalog.csv");
    config.books_per_load = 12;
    config.default_zoom = 2.0;
    config.ui_font = Some(PathBuf::from("fonts/Amiri-Regular.ttf"));

    config.save(&path).await.unwrap();
    let loaded = LibraryConfig::load(&path).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maktaba.json");
    tokio::fs::write(&path, r#"{ "books_per_load": 6 }"#).await.unwrap();

    let loaded = LibraryConfig::load(&path).await.unwrap();
    assert_eq!(loaded.books_per_load, 6);
    assert_eq!(loaded.catalog_path, LibraryConfig::default().catalog_path);
}

#[tokio::test]
async fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maktaba.json");
    tokio::fs::write(&path, r#"{ "default_zoom": 9.0 }"#).await.unwrap();

    assert!(matches!(
        LibraryConfig::load(&path).await,
        Err(CatalogError::Config(_))
    ));
}

#[tokio::test]
async fn test_missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let loaded = LibraryConfig::load_or_default(Some(&path)).await.unwrap();
    assert_eq!(loaded, LibraryConfig::default());

    let loaded = LibraryConfig::load_or_default(None).await.unwrap();
    assert_eq!(loaded, LibraryConfig::default());
}
