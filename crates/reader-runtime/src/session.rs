use crate::coalescer::RenderCoalescer;
use crate::zoom::Zoom;
use crate::{DocumentId, RenderRequest};
use library_catalog::BookId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the worker to open the document
    Loading,
    Ready { total_pages: u32 },
}

/// Reading state for the book currently open in the reader panel.
///
/// Created when a book is opened, dropped when the panel closes.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    book_id: BookId,
    doc_id: DocumentId,
    title: String,
    phase: SessionPhase,
    current_page: u32,
    displayed_page: Option<u32>,
    zoom: Zoom,
    coalescer: RenderCoalescer,
    page_input: String,
    dark_mode: bool,
    fullscreen: bool,
}

impl ViewerSession {
    pub fn new(book_id: BookId, doc_id: DocumentId, title: impl Into<String>, zoom: Zoom) -> Self {
        Self {
            book_id,
            doc_id,
            title: title.into(),
            phase: SessionPhase::Loading,
            current_page: 1,
            displayed_page: None,
            zoom,
            coalescer: RenderCoalescer::new(),
            page_input: "1".to_string(),
            dark_mode: false,
            fullscreen: false,
        }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn doc_id(&self) -> DocumentId {
        self.doc_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn total_pages(&self) -> Option<u32> {
        match self.phase {
            SessionPhase::Loading => None,
            SessionPhase::Ready { total_pages } => Some(total_pages),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Last page whose render completed
    pub fn displayed_page(&self) -> Option<u32> {
        self.displayed_page
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn is_rendering(&self) -> bool {
        self.coalescer.is_busy()
    }

    pub fn pending_page(&self) -> Option<u32> {
        self.coalescer.pending()
    }

    pub fn page_input(&self) -> &str {
        &self.page_input
    }

    pub fn page_input_mut(&mut self) -> &mut String {
        &mut self.page_input
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn can_go_back(&self) -> bool {
        self.total_pages().is_some() && self.current_page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.total_pages()
            .is_some_and(|total| self.current_page < total)
    }

    /// Fraction of the book read, based on the displayed page
    pub fn progress(&self) -> f32 {
        match (self.displayed_page, self.total_pages()) {
            (Some(page), Some(total)) if total > 0 => page as f32 / total as f32,
            _ => 0.0,
        }
    }

    pub(crate) fn mark_ready(&mut self, total_pages: u32, first_page: u32) {
        self.phase = SessionPhase::Ready { total_pages };
        self.set_current_page(first_page);
    }

    pub(crate) fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
        self.revert_page_input();
    }

    pub(crate) fn revert_page_input(&mut self) {
        self.page_input = self.current_page.to_string();
    }

    pub(crate) fn mark_displayed(&mut self, page: u32) {
        self.displayed_page = Some(page);
    }

    pub(crate) fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    pub(crate) fn coalescer_mut(&mut self) -> &mut RenderCoalescer {
        &mut self.coalescer
    }

    pub(crate) fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub(crate) fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Request `page` at the current zoom. `Some` when a render must start now.
    pub(crate) fn request_page(&mut self, page: u32) -> Option<RenderRequest> {
        self.coalescer
            .request_page(page)
            .map(|page| self.render_request(page))
    }

    pub(crate) fn render_request(&self, page: u32) -> RenderRequest {
        RenderRequest {
            doc_id: self.doc_id,
            page,
            scale: self.zoom.scale(),
        }
    }
}
