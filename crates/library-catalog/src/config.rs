use crate::browse::DEFAULT_BOOKS_PER_LOAD;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;
pub const DEFAULT_ZOOM: f32 = 1.5;

/// Name of the key-value file inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// Application configuration shared by the GUI and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Catalog file (`.json` or `.csv`)
    pub catalog_path: PathBuf,
    /// Where reading positions and favorites live; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub books_per_load: usize,
    pub suggestion_limit: usize,
    pub default_zoom: f32,
    /// Rendered pages kept by the reader worker
    pub page_cache_size: usize,
    /// Font file with Arabic glyphs for the GUI
    pub ui_font: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/catalog.json"),
            data_dir: None,
            books_per_load: DEFAULT_BOOKS_PER_LOAD,
            suggestion_limit: 5,
            default_zoom: DEFAULT_ZOOM,
            page_cache_size: 50,
            ui_font: None,
        }
    }
}

impl LibraryConfig {
    /// Load configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given and present, defaults otherwise
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if tokio::fs::try_exists(path).await? => Self::load(path).await,
            Some(path) => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.books_per_load == 0 {
            return Err(CatalogError::Config(
                "books_per_load must be at least 1".to_string(),
            ));
        }

        if self.page_cache_size == 0 {
            return Err(CatalogError::Config(
                "page_cache_size must be at least 1".to_string(),
            ));
        }

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.default_zoom) {
            return Err(CatalogError::Config(format!(
                "default_zoom {} is outside {}..={}",
                self.default_zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }

        Ok(())
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("maktaba"))
                .ok_or(CatalogError::NoDataDirectory),
        }
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        Ok(self.resolved_data_dir()?.join(STORAGE_FILE))
    }
}
