#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod covers;
mod logger;
mod notifications;
mod renderer;
mod views;

use anyhow::{Context, Result, anyhow};
use eframe::egui;
use library_catalog::{Catalog, LibraryConfig};
use std::path::PathBuf;

const LOG_CAPACITY: usize = 500;

/// Usage: `maktaba-gui [config.json]`
fn main() -> Result<()> {
    let logger = logger::AppLogger::new(LOG_CAPACITY);
    logger.init()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = runtime.block_on(LibraryConfig::load_or_default(config_path.as_deref()))?;
    let catalog = runtime.block_on(Catalog::load(&config.catalog_path));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 820.0])
            .with_title("المكتبة الإسلامية"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Maktaba",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LibraryApp::new(
                cc, handle, logger, config, catalog,
            )))
        }),
    )
    .map_err(|e| anyhow!("GUI failed: {}", e))
}
