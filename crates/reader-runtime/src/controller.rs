//! Presentation-independent reader panel logic.
//!
//! Views feed user actions and worker updates in, and carry out the returned
//! effects. Nothing here touches the GUI or the worker directly.

use crate::coalescer::Settled;
use crate::renderer::{ReaderError, Result};
use crate::session::{SessionPhase, ViewerSession};
use crate::zoom::Zoom;
use crate::{DocumentId, ReaderCommand, RenderRequest};
use library_catalog::{BookId, Catalog, KeyValueStore, ReadingPositions};
use std::path::PathBuf;

/// Things the user can do while the reader is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderAction {
    PreviousPage,
    NextPage,
    /// Raw text typed into the page field
    JumpTo(String),
    ZoomIn,
    ZoomOut,
    ToggleDarkMode,
    ToggleFullscreen,
    Download,
    Close,
}

/// Work the host must carry out after a controller call
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderEffect {
    Load { doc_id: DocumentId, path: PathBuf },
    Render(RenderRequest),
    Release(DocumentId),
    Download(BookId),
    Fullscreen(bool),
    Notify(Notice),
    /// The panel was dismissed and the session dropped
    Closed,
}

impl ReaderEffect {
    /// The worker command for effects the worker handles
    pub fn into_command(self) -> Option<ReaderCommand> {
        match self {
            ReaderEffect::Load { doc_id, path } => Some(ReaderCommand::LoadDocument { doc_id, path }),
            ReaderEffect::Render(request) => Some(ReaderCommand::RenderPage(request)),
            ReaderEffect::Release(doc_id) => Some(ReaderCommand::CloseDocument { doc_id }),
            _ => None,
        }
    }
}

/// User-visible failure notices
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    LoadFailed { title: String, message: String },
    RenderFailed { page: u32, message: String },
}

impl Notice {
    pub fn user_message(&self) -> String {
        match self {
            Notice::LoadFailed { .. } => ReaderError::Load(String::new()).user_message(),
            Notice::RenderFailed { page, .. } => format!("تعذر عرض الصفحة {}", page),
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Notice::LoadFailed { message, .. } | Notice::RenderFailed { message, .. } => message,
        }
    }
}

/// Read-only view of the open session for drawing the panel
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderSnapshot {
    pub book_id: BookId,
    pub doc_id: DocumentId,
    pub title: String,
    pub loading: bool,
    pub current_page: u32,
    pub total_pages: Option<u32>,
    pub displayed_page: Option<u32>,
    pub progress: f32,
    pub zoom_percent: u32,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub rendering: bool,
    pub dark_mode: bool,
    pub fullscreen: bool,
}

/// Owns the viewer session and drives the render coalescer
pub struct ReaderController<S> {
    positions: ReadingPositions<S>,
    session: Option<ViewerSession>,
    next_doc_id: u64,
    default_zoom: Zoom,
}

impl<S: KeyValueStore> ReaderController<S> {
    pub fn new(positions: ReadingPositions<S>) -> Self {
        Self {
            positions,
            session: None,
            next_doc_id: 0,
            default_zoom: Zoom::default(),
        }
    }

    pub fn with_default_zoom(mut self, scale: f32) -> Self {
        self.default_zoom = Zoom::new(scale);
        self
    }

    pub fn positions(&self) -> &ReadingPositions<S> {
        &self.positions
    }

    pub fn session(&self) -> Option<&ViewerSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn open_book_id(&self) -> Option<BookId> {
        self.session.as_ref().map(ViewerSession::book_id)
    }

    /// Editable page field of the open session
    pub fn page_input_mut(&mut self) -> Option<&mut String> {
        self.session.as_mut().map(ViewerSession::page_input_mut)
    }

    pub fn snapshot(&self) -> Option<ReaderSnapshot> {
        let session = self.session.as_ref()?;
        Some(ReaderSnapshot {
            book_id: session.book_id(),
            doc_id: session.doc_id(),
            title: session.title().to_string(),
            loading: session.phase() == SessionPhase::Loading,
            current_page: session.current_page(),
            total_pages: session.total_pages(),
            displayed_page: session.displayed_page(),
            progress: session.progress(),
            zoom_percent: session.zoom().percent(),
            can_go_back: session.can_go_back(),
            can_go_forward: session.can_go_forward(),
            rendering: session.is_rendering(),
            dark_mode: session.dark_mode(),
            fullscreen: session.fullscreen(),
        })
    }

    /// Open the reader for a catalog book.
    ///
    /// Books without a document are rejected and leave any open session untouched.
    pub fn open(&mut self, catalog: &Catalog, book_id: BookId) -> Result<Vec<ReaderEffect>> {
        let book = catalog
            .get(book_id)
            .ok_or(ReaderError::BookNotFound(book_id))?;
        let path = catalog
            .document_path(book)
            .ok_or(ReaderError::Unavailable(book_id))?;

        let mut effects = self.close();

        let doc_id = DocumentId(self.next_doc_id);
        self.next_doc_id += 1;

        log::info!("Opening book {} ({})", book_id, path.display());
        self.session = Some(ViewerSession::new(
            book_id,
            doc_id,
            book.title.clone(),
            self.default_zoom,
        ));

        effects.push(ReaderEffect::Load { doc_id, path });
        Ok(effects)
    }

    /// Worker finished opening the document
    pub fn document_loaded(&mut self, doc_id: DocumentId, page_count: u32) -> Vec<ReaderEffect> {
        // The worker holds the document open, so an empty one must be released
        if page_count == 0 {
            return self.fail_load(doc_id, "Document has no pages".to_string(), true);
        }

        let Some(session) = self.session.as_mut().filter(|s| s.doc_id() == doc_id) else {
            return Vec::new();
        };

        let saved = self.positions.load(session.book_id());
        let first_page = if saved <= page_count {
            saved
        } else {
            log::debug!(
                "Saved page {} is beyond {} pages, starting at 1",
                saved,
                page_count
            );
            1
        };

        session.mark_ready(page_count, first_page);
        session
            .request_page(first_page)
            .map(ReaderEffect::Render)
            .into_iter()
            .collect()
    }

    /// Worker could not open the document: notify and reset to closed
    pub fn load_failed(&mut self, doc_id: DocumentId, message: String) -> Vec<ReaderEffect> {
        self.fail_load(doc_id, message, false)
    }

    fn fail_load(&mut self, doc_id: DocumentId, message: String, release: bool) -> Vec<ReaderEffect> {
        let Some(session) = self.live_session(doc_id) else {
            return Vec::new();
        };

        log::warn!("Failed to load book {}: {}", session.book_id(), message);
        let notice = Notice::LoadFailed {
            title: session.title().to_string(),
            message,
        };

        let mut effects = vec![ReaderEffect::Notify(notice)];
        effects.extend(self.teardown(release));
        effects
    }

    /// A render completed. Replays the pending page or settles the display.
    pub fn page_rendered(&mut self, request: RenderRequest) -> Vec<ReaderEffect> {
        let Some(session) = self.session.as_mut().filter(|s| s.doc_id() == request.doc_id) else {
            return Vec::new();
        };

        match session.coalescer_mut().complete() {
            Settled::Replay { page } => {
                log::debug!("Page {} settled, rendering pending page {}", request.page, page);
                vec![ReaderEffect::Render(session.render_request(page))]
            }
            Settled::Idle { .. } => {
                session.mark_displayed(request.page);
                session.revert_page_input();
                let book_id = session.book_id();
                self.positions.save(book_id, request.page);
                Vec::new()
            }
        }
    }

    /// A render failed. The in-flight flag is cleared on this path too.
    pub fn render_failed(&mut self, request: RenderRequest, message: String) -> Vec<ReaderEffect> {
        let Some(session) = self.session.as_mut().filter(|s| s.doc_id() == request.doc_id) else {
            return Vec::new();
        };

        log::warn!("Failed to render page {}: {}", request.page, message);

        match session.coalescer_mut().fail() {
            Settled::Replay { page } => {
                vec![ReaderEffect::Render(session.render_request(page))]
            }
            Settled::Idle { .. } => {
                let notice = Notice::RenderFailed {
                    page: request.page,
                    message,
                };
                let mut effects = vec![ReaderEffect::Notify(notice)];
                effects.extend(self.teardown(true));
                effects
            }
        }
    }

    pub fn dispatch(&mut self, action: ReaderAction) -> Vec<ReaderEffect> {
        match action {
            ReaderAction::PreviousPage => self.previous_page(),
            ReaderAction::NextPage => self.next_page(),
            ReaderAction::JumpTo(input) => self.jump_to(&input),
            ReaderAction::ZoomIn => self.zoom(true),
            ReaderAction::ZoomOut => self.zoom(false),
            ReaderAction::ToggleDarkMode => {
                if let Some(session) = self.session.as_mut() {
                    session.toggle_dark_mode();
                }
                Vec::new()
            }
            ReaderAction::ToggleFullscreen => match self.session.as_mut() {
                Some(session) => vec![ReaderEffect::Fullscreen(session.toggle_fullscreen())],
                None => Vec::new(),
            },
            ReaderAction::Download => self
                .open_book_id()
                .map(ReaderEffect::Download)
                .into_iter()
                .collect(),
            ReaderAction::Close => self.close(),
        }
    }

    pub fn previous_page(&mut self) -> Vec<ReaderEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if !session.can_go_back() {
            return Vec::new();
        }

        let page = session.current_page() - 1;
        session.set_current_page(page);
        session.request_page(page).map(ReaderEffect::Render).into_iter().collect()
    }

    pub fn next_page(&mut self) -> Vec<ReaderEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if !session.can_go_forward() {
            return Vec::new();
        }

        let page = session.current_page() + 1;
        session.set_current_page(page);
        session.request_page(page).map(ReaderEffect::Render).into_iter().collect()
    }

    /// Jump to typed page text; invalid or out-of-range input reverts the field
    pub fn jump_to(&mut self, input: &str) -> Vec<ReaderEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let Some(total) = session.total_pages() else {
            session.revert_page_input();
            return Vec::new();
        };

        match parse_page(input, total) {
            Ok(page) => {
                session.set_current_page(page);
                session.request_page(page).map(ReaderEffect::Render).into_iter().collect()
            }
            Err(e) => {
                log::debug!("Rejected page input {:?}: {}", input, e);
                session.revert_page_input();
                Vec::new()
            }
        }
    }

    fn zoom(&mut self, zoom_in: bool) -> Vec<ReaderEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.total_pages().is_none() {
            return Vec::new();
        }

        let zoom = session.zoom_mut();
        let changed = if zoom_in { zoom.zoom_in() } else { zoom.zoom_out() };
        if !changed {
            return Vec::new();
        }

        let page = session.current_page();
        session.request_page(page).map(ReaderEffect::Render).into_iter().collect()
    }

    /// Close the panel, dropping the session
    pub fn close(&mut self) -> Vec<ReaderEffect> {
        self.teardown(true)
    }

    fn teardown(&mut self, release: bool) -> Vec<ReaderEffect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };

        log::info!("Closing book {}", session.book_id());

        let mut effects = Vec::new();
        if release {
            effects.push(ReaderEffect::Release(session.doc_id()));
        }
        if session.fullscreen() {
            effects.push(ReaderEffect::Fullscreen(false));
        }
        effects.push(ReaderEffect::Closed);
        effects
    }

    fn live_session(&self, doc_id: DocumentId) -> Option<&ViewerSession> {
        self.session.as_ref().filter(|s| s.doc_id() == doc_id)
    }
}

fn parse_page(input: &str, total: u32) -> Result<u32> {
    let page: i64 = input
        .trim()
        .parse()
        .map_err(|_| ReaderError::InvalidPage(input.trim().to_string()))?;

    if (1..=total as i64).contains(&page) {
        Ok(page as u32)
    } else {
        Err(ReaderError::PageOutOfRange {
            page: page.clamp(0, u32::MAX as i64) as u32,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_page_accepts_trimmed_numbers_in_range() {
        assert_eq!(parse_page(" 8 ", 10).unwrap(), 8);
        assert_eq!(parse_page("10", 10).unwrap(), 10);
    }

    #[test]
    fn parse_page_separates_text_from_range_errors() {
        assert!(matches!(
            parse_page("abc", 10),
            Err(ReaderError::InvalidPage(text)) if text == "abc"
        ));
        assert!(matches!(parse_page("2.5", 10), Err(ReaderError::InvalidPage(_))));
        assert!(matches!(
            parse_page("99", 10),
            Err(ReaderError::PageOutOfRange { page: 99, total: 10 })
        ));
        assert!(matches!(
            parse_page("-3", 10),
            Err(ReaderError::PageOutOfRange { page: 0, total: 10 })
        ));
    }
}
