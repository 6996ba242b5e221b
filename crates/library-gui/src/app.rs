use crate::covers::CoverCache;
use crate::logger::AppLogger;
use crate::notifications::Notifications;
use crate::renderer::PdfiumRenderer;
use crate::views::catalog::CatalogPage;
use crate::views::{
    CatalogView, PageView, SearchOverlay, UiEvent, show_book_modal, show_catalog, show_log_panel,
    show_reader, show_search_overlay,
};
use eframe::egui;
use library_catalog::{
    BookId, BrowseState, Catalog, CatalogError, Favorites, JsonFileStore, KeyValueStore,
    LibraryConfig, MemoryStore, ReadingPositions, plan_download,
};
use reader_runtime::{
    GlobalShortcut, ReaderCommand, ReaderController, ReaderEffect, ReaderError,
    ReaderKey, ReaderUpdate, WheelDirection, global_shortcut, reader_action_for_key,
    reader_action_for_wheel,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type SharedStore = Arc<dyn KeyValueStore>;

pub struct LibraryApp {
    config: LibraryConfig,
    catalog: Option<Catalog>,
    catalog_error: Option<String>,

    // Catalog page
    browse: BrowseState,
    view: CatalogView,
    search: SearchOverlay,
    selected_book: Option<BookId>,
    favorites: Favorites<SharedStore>,
    covers: CoverCache,
    scroll_to_top: bool,

    // Reader panel
    reader: ReaderController<SharedStore>,
    page_view: PageView,
    downloads: DownloadQueue,

    notifications: Notifications,
    logger: AppLogger,
    show_log: bool,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<ReaderCommand>,
    update_rx: mpsc::UnboundedReceiver<ReaderUpdate>,
    _tokio_handle: tokio::runtime::Handle,
}

impl LibraryApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
        config: LibraryConfig,
        catalog: library_catalog::Result<Catalog>,
    ) -> Self {
        if let Some(font) = &config.ui_font {
            match install_ui_font(&cc.egui_ctx, font) {
                Ok(()) => log::info!("Using UI font {}", font.display()),
                Err(e) => log::warn!("Failed to load UI font {}: {}", font.display(), e),
            }
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(reader_runtime::worker::worker_task(
            Arc::new(PdfiumRenderer),
            config.page_cache_size,
            command_rx,
            update_tx,
        ));

        let (catalog, catalog_error) = match catalog {
            Ok(catalog) => {
                log::info!("Loaded {} books from {}", catalog.len(), config.catalog_path.display());
                (Some(catalog), None)
            }
            Err(e) => {
                log::error!("Failed to load catalog {}: {}", config.catalog_path.display(), e);
                (None, Some(e.to_string()))
            }
        };

        let store = open_store(&config);
        let reader = ReaderController::new(ReadingPositions::new(store.clone()))
            .with_default_zoom(config.default_zoom);

        Self {
            browse: BrowseState::new(config.books_per_load),
            config,
            catalog,
            catalog_error,
            view: CatalogView::default(),
            search: SearchOverlay::default(),
            selected_book: None,
            favorites: Favorites::new(store),
            covers: CoverCache::default(),
            scroll_to_top: false,
            reader,
            page_view: PageView::default(),
            downloads: DownloadQueue::default(),
            notifications: Notifications::default(),
            logger,
            show_log: false,
            command_tx,
            update_rx,
            _tokio_handle: tokio_handle,
        }
    }

    /// Feed worker updates into the reader controller
    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            let effects = match update {
                ReaderUpdate::DocumentLoaded { doc_id, page_count } => {
                    self.reader.document_loaded(doc_id, page_count)
                }
                ReaderUpdate::LoadFailed { doc_id, message } => self.reader.load_failed(doc_id, message),
                ReaderUpdate::PageRendered { request, page } => {
                    if self.reader.session().is_some_and(|s| s.doc_id() == request.doc_id) {
                        self.page_view.set_page(page);
                    }
                    self.reader.page_rendered(request)
                }
                ReaderUpdate::RenderFailed { request, message } => {
                    self.reader.render_failed(request, message)
                }
                ReaderUpdate::DocumentClosed { doc_id } => {
                    log::debug!("Worker released {:?}", doc_id);
                    Vec::new()
                }
                ReaderUpdate::DownloadComplete { book_id, path } => {
                    self.downloads.settle();
                    log::info!("Book {} saved to {}", book_id, path.display());
                    self.notifications.success("تم التحميل بنجاح!");
                    Vec::new()
                }
                ReaderUpdate::DownloadFailed { book_id, message } => {
                    self.downloads.settle();
                    log::warn!("Download of book {} failed: {}", book_id, message);
                    self.notifications.error("عذراً، فشل تحميل الكتاب.");
                    Vec::new()
                }
            };

            self.apply_effects(ctx, effects);
            ctx.request_repaint();
        }
    }

    fn apply_effects(&mut self, ctx: &egui::Context, effects: Vec<ReaderEffect>) {
        for effect in effects {
            match effect {
                ReaderEffect::Download(book_id) => self.start_download(book_id),
                ReaderEffect::Fullscreen(on) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
                }
                ReaderEffect::Notify(notice) => {
                    log::warn!("{} ({})", notice.user_message(), notice.detail());
                    self.notifications.error(notice.user_message());
                }
                ReaderEffect::Closed => self.page_view.clear(),
                effect => {
                    if let Some(command) = effect.into_command() {
                        if self.command_tx.send(command).is_err() {
                            log::error!("Reader worker is not running");
                        }
                    }
                }
            }
        }
    }

    fn open_book(&mut self, ctx: &egui::Context, book_id: BookId) {
        let Some(catalog) = &self.catalog else {
            return;
        };

        match self.reader.open(catalog, book_id) {
            Ok(effects) => {
                self.selected_book = None;
                self.search.close();
                self.apply_effects(ctx, effects);
            }
            Err(e) => {
                log::warn!("{}", e);
                self.notifications.error(e.user_message());
            }
        }
    }

    /// Ask for a folder and copy the book's PDF there as "<title>.pdf"
    fn start_download(&mut self, book_id: BookId) {
        let Some(catalog) = &self.catalog else {
            return;
        };

        let available = match catalog.get(book_id) {
            None => Err(ReaderError::BookNotFound(book_id)),
            Some(book) if !book.has_document() => Err(ReaderError::Unavailable(book_id)),
            Some(_) => Ok(()),
        };
        if let Err(e) = available {
            self.notifications.error(e.user_message());
            return;
        }

        let Some(folder) = rfd::FileDialog::new().set_title("حفظ الكتاب").pick_folder() else {
            return;
        };

        match plan_download(catalog, book_id, &folder) {
            Ok((source, destination)) => {
                let command = ReaderCommand::DownloadBook {
                    book_id,
                    source,
                    destination,
                };
                if self.downloads.submit(&self.command_tx, command) {
                    self.notifications.info("جاري التحميل...");
                } else {
                    self.notifications.error("عذراً، فشل تحميل الكتاب.");
                }
            }
            Err(e) => {
                log::warn!("Cannot download book {}: {}", book_id, e);
                self.notifications.error(catalog_message(&e));
            }
        }
    }

    fn toggle_favorite(&mut self, book_id: BookId) {
        match self.favorites.toggle(book_id) {
            Ok(true) => self.notifications.info("تمت الإضافة إلى المفضلة"),
            Ok(false) => self.notifications.info("تمت الإزالة من المفضلة"),
            Err(e) => {
                log::warn!("Failed to save favorites: {}", e);
                self.notifications.error("تعذر حفظ المفضلة");
            }
        }
    }

    fn handle_event(&mut self, ctx: &egui::Context, event: UiEvent) {
        match event {
            UiEvent::SelectBook(book_id) => self.selected_book = Some(book_id),
            UiEvent::CloseBookModal => self.selected_book = None,
            UiEvent::ReadBook(book_id) => self.open_book(ctx, book_id),
            UiEvent::DownloadBook(book_id) => self.start_download(book_id),
            UiEvent::ToggleFavorite(book_id) => self.toggle_favorite(book_id),
            UiEvent::SetFilter(filter) => {
                self.browse.set_filter(filter);
                self.view = CatalogView::Browse;
            }
            UiEvent::LoadMore => self.browse.load_more(),
            UiEvent::ShowView(view) => self.view = view,
            UiEvent::OpenSearch => self.search.open(),
            UiEvent::CloseSearch => self.search.close(),
            UiEvent::RunSearch(term) => {
                let Some(catalog) = &self.catalog else {
                    return;
                };
                self.view = CatalogView::for_search(catalog, &term);
                if let CatalogView::SearchResults { books, .. } = &self.view {
                    log::info!("Search \"{}\" matched {} books", term.trim(), books.len());
                }
                self.search.close();
                self.scroll_to_top = true;
            }
            UiEvent::Reader(action) => {
                let effects = self.reader.dispatch(action);
                self.apply_effects(ctx, effects);
            }
        }
    }

    /// Keyboard and wheel input, turned into the same events the widgets produce
    fn handle_input(&mut self, ctx: &egui::Context) -> Vec<UiEvent> {
        let text_focused = ctx.wants_keyboard_input();
        let input_events = ctx.input(|i| i.events.clone());
        let reader_open = self.reader.is_open();
        let mut events = Vec::new();

        for event in input_events {
            match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    if reader_open {
                        let Some(reader_key) = reader_key(key) else {
                            continue;
                        };
                        if reader_key == ReaderKey::Escape || !(text_focused || modifiers.command) {
                            events.push(UiEvent::Reader(reader_action_for_key(reader_key)));
                        }
                    } else if let Some(shortcut) =
                        key_char(key).and_then(|c| global_shortcut(modifiers.command, c))
                    {
                        match shortcut {
                            GlobalShortcut::OpenSearch => events.push(UiEvent::OpenSearch),
                            GlobalShortcut::ScrollToTop => self.scroll_to_top = true,
                        }
                    } else if key == egui::Key::Escape {
                        if self.search.open {
                            events.push(UiEvent::CloseSearch);
                        } else if self.selected_book.is_some() {
                            events.push(UiEvent::CloseBookModal);
                        }
                    }
                }
                egui::Event::MouseWheel {
                    delta, modifiers, ..
                } if reader_open => {
                    let direction = if delta.y > 0.0 {
                        WheelDirection::Up
                    } else if delta.y < 0.0 {
                        WheelDirection::Down
                    } else {
                        continue;
                    };
                    if let Some(action) = reader_action_for_wheel(direction, modifiers.command) {
                        events.push(UiEvent::Reader(action));
                    }
                }
                _ => {}
            }
        }

        events
    }
}

impl eframe::App for LibraryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_updates(ctx);
        let mut events = self.handle_input(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📚 مكتبة");
                if let Some(message) = self.logger.latest_message() {
                    ui.weak(message);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.selectable_label(self.show_log, "📋").on_hover_text("Log").clicked() {
                        self.show_log = !self.show_log;
                    }
                });
            });
        });

        show_log_panel(ctx, &self.logger, &mut self.show_log);

        let favorites = self.favorites.list();

        egui::CentralPanel::default().show(ctx, |ui| {
            if let (Some(snapshot), Some(page_input)) =
                (self.reader.snapshot(), self.reader.page_input_mut())
            {
                show_reader(ui, &snapshot, page_input, &mut self.page_view, &mut events);
            } else if let Some(catalog) = &self.catalog {
                let page = CatalogPage {
                    catalog,
                    browse: &self.browse,
                    view: &self.view,
                    favorites: &favorites,
                    covers: &mut self.covers,
                    scroll_to_top: self.scroll_to_top,
                };
                show_catalog(ui, page, &mut events);
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.heading("تعذر تحميل فهرس الكتب");
                    ui.label(self.config.catalog_path.display().to_string());
                    if let Some(error) = &self.catalog_error {
                        ui.colored_label(ui.visuals().error_fg_color, error);
                    }
                });
            }
        });
        self.scroll_to_top = false;

        if let Some(catalog) = self.catalog.as_ref().filter(|_| !self.reader.is_open()) {
            if let Some(book) = self.selected_book.and_then(|id| catalog.get(id)) {
                let cover = self.covers.get(ctx, catalog, book);
                show_book_modal(ctx, book, cover, favorites.contains(&book.id), &mut events);
            }
            show_search_overlay(
                ctx,
                &mut self.search,
                catalog,
                self.config.suggestion_limit,
                &mut events,
            );
        }

        self.notifications.show(ctx);

        for event in events {
            self.handle_event(ctx, event);
        }

        let busy = self.reader.snapshot().is_some_and(|s| s.loading || s.rendering);
        if busy || self.downloads.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

/// Downloads handed to the worker and not yet reported back
#[derive(Debug, Default)]
struct DownloadQueue {
    in_flight: usize,
}

impl DownloadQueue {
    /// Send a download to the worker; counted only once the worker has it
    fn submit(&mut self, command_tx: &mpsc::UnboundedSender<ReaderCommand>, command: ReaderCommand) -> bool {
        if command_tx.send(command).is_err() {
            log::error!("Reader worker is not running");
            return false;
        }
        self.in_flight += 1;
        true
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

fn open_store(config: &LibraryConfig) -> SharedStore {
    match config.storage_path().and_then(JsonFileStore::open) {
        Ok(store) => {
            log::info!("Saving reading progress to {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            log::warn!("Reading progress will not be saved: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}

fn install_ui_font(ctx: &egui::Context, path: &Path) -> std::io::Result<()> {
    let bytes = std::fs::read(path)?;
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("ui_font".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, "ui_font".to_owned());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

fn catalog_message(error: &CatalogError) -> String {
    match error {
        CatalogError::BookNotFound(id) => ReaderError::BookNotFound(*id).user_message(),
        CatalogError::Unavailable(id) => ReaderError::Unavailable(*id).user_message(),
        other => other.to_string(),
    }
}

fn reader_key(key: egui::Key) -> Option<ReaderKey> {
    match key {
        egui::Key::ArrowLeft => Some(ReaderKey::ArrowLeft),
        egui::Key::ArrowRight => Some(ReaderKey::ArrowRight),
        egui::Key::Escape => Some(ReaderKey::Escape),
        egui::Key::Plus => Some(ReaderKey::Plus),
        egui::Key::Equals => Some(ReaderKey::Equals),
        egui::Key::Minus => Some(ReaderKey::Minus),
        _ => None,
    }
}

/// Single-character key names, e.g. `Key::K` → 'K'
fn key_char(key: egui::Key) -> Option<char> {
    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn download(id: u64) -> ReaderCommand {
        ReaderCommand::DownloadBook {
            book_id: BookId(id),
            source: PathBuf::from("books/a.pdf"),
            destination: PathBuf::from("out/a.pdf"),
        }
    }

    #[test]
    fn download_counted_until_settled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut downloads = DownloadQueue::default();

        assert!(downloads.submit(&tx, download(1)));
        assert!(downloads.is_busy());
        assert!(matches!(rx.try_recv(), Ok(ReaderCommand::DownloadBook { .. })));

        downloads.settle();
        assert!(!downloads.is_busy());
        downloads.settle();
        assert!(!downloads.is_busy());
    }

    #[test]
    fn download_not_counted_when_worker_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut downloads = DownloadQueue::default();

        assert!(!downloads.submit(&tx, download(1)));
        assert!(!downloads.is_busy());
    }
}
