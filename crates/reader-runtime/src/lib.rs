mod cache;
mod coalescer;
mod controller;
mod input;
mod renderer;
mod session;
pub mod worker;
mod zoom;

use std::path::PathBuf;
use std::sync::Arc;

pub use cache::PageCache;
pub use coalescer::{RenderCoalescer, Settled};
pub use controller::{Notice, ReaderAction, ReaderController, ReaderEffect, ReaderSnapshot};
pub use input::{
    GlobalShortcut, ReaderKey, WheelDirection, global_shortcut, reader_action_for_key,
    reader_action_for_wheel,
};
pub use renderer::{DocumentRenderer, ReaderError, RenderedPage, Result};
pub use session::{SessionPhase, ViewerSession};
pub use zoom::Zoom;

// Re-export types from the catalog crate
pub use library_catalog::{Book, BookId};

/// Handle to a document opened by the worker; unique per viewer session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// One page at one scale. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub doc_id: DocumentId,
    pub page: u32,
    pub scale: f32,
}

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum ReaderCommand {
    LoadDocument {
        doc_id: DocumentId,
        path: PathBuf,
    },
    RenderPage(RenderRequest),
    CloseDocument {
        doc_id: DocumentId,
    },
    DownloadBook {
        book_id: BookId,
        source: PathBuf,
        destination: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum ReaderUpdate {
    DocumentLoaded {
        doc_id: DocumentId,
        page_count: u32,
    },
    LoadFailed {
        doc_id: DocumentId,
        message: String,
    },
    PageRendered {
        request: RenderRequest,
        page: Arc<RenderedPage>,
    },
    RenderFailed {
        request: RenderRequest,
        message: String,
    },
    DocumentClosed {
        doc_id: DocumentId,
    },
    DownloadComplete {
        book_id: BookId,
        path: PathBuf,
    },
    DownloadFailed {
        book_id: BookId,
        message: String,
    },
}
