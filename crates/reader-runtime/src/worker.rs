use crate::cache::PageCache;
use crate::renderer::{DocumentRenderer, ReaderError, RenderedPage, Result};
use crate::{DocumentId, ReaderCommand, ReaderUpdate, RenderRequest};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

struct OpenDocument {
    path: PathBuf,
    page_count: u32,
}

/// Documents opened by the worker plus their rendered pages
struct WorkerState<R> {
    renderer: Arc<R>,
    documents: HashMap<DocumentId, OpenDocument>,
    cache: PageCache,
}

/// Async worker task that processes reader commands and sends updates.
///
/// Runs until the command channel closes. Renderer calls go through
/// `spawn_blocking` so the runtime stays responsive.
pub async fn worker_task<R: DocumentRenderer>(
    renderer: Arc<R>,
    cache_size: usize,
    mut command_rx: mpsc::UnboundedReceiver<ReaderCommand>,
    update_tx: mpsc::UnboundedSender<ReaderUpdate>,
) {
    let mut state = WorkerState {
        renderer,
        documents: HashMap::new(),
        cache: PageCache::new(cache_size),
    };

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut state, &update_tx).await;
    }

    log::debug!("Reader worker stopped");
}

async fn process_command<R: DocumentRenderer>(
    cmd: ReaderCommand,
    state: &mut WorkerState<R>,
    update_tx: &mpsc::UnboundedSender<ReaderUpdate>,
) {
    let update = match cmd {
        ReaderCommand::LoadDocument { doc_id, path } => match handle_load(state, doc_id, path).await {
            Ok(page_count) => ReaderUpdate::DocumentLoaded { doc_id, page_count },
            Err(e) => ReaderUpdate::LoadFailed {
                doc_id,
                message: e.to_string(),
            },
        },
        ReaderCommand::RenderPage(request) => match handle_render(state, request).await {
            Ok(page) => ReaderUpdate::PageRendered { request, page },
            Err(e) => ReaderUpdate::RenderFailed {
                request,
                message: e.to_string(),
            },
        },
        ReaderCommand::CloseDocument { doc_id } => {
            state.documents.remove(&doc_id);
            state.cache.remove_document(doc_id);
            ReaderUpdate::DocumentClosed { doc_id }
        }
        ReaderCommand::DownloadBook {
            book_id,
            source,
            destination,
        } => match library_catalog::copy_document(&source, &destination).await {
            Ok(bytes) => {
                log::info!("Saved {} bytes to {}", bytes, destination.display());
                ReaderUpdate::DownloadComplete {
                    book_id,
                    path: destination,
                }
            }
            Err(e) => ReaderUpdate::DownloadFailed {
                book_id,
                message: e.to_string(),
            },
        },
    };

    // The UI may already be gone during shutdown
    let _ = update_tx.send(update);
}

async fn handle_load<R: DocumentRenderer>(
    state: &mut WorkerState<R>,
    doc_id: DocumentId,
    path: PathBuf,
) -> Result<u32> {
    let renderer = Arc::clone(&state.renderer);
    let path_clone = path.clone();
    let page_count = tokio::task::spawn_blocking(move || renderer.page_count(&path_clone)).await??;

    log::info!("Loaded {} ({} pages)", path.display(), page_count);
    state.documents.insert(doc_id, OpenDocument { path, page_count });
    Ok(page_count)
}

async fn handle_render<R: DocumentRenderer>(
    state: &mut WorkerState<R>,
    request: RenderRequest,
) -> Result<Arc<RenderedPage>> {
    if let Some(page) = state.cache.get(&request) {
        log::debug!("Page {} served from cache", request.page);
        return Ok(page);
    }

    let document = state
        .documents
        .get(&request.doc_id)
        .ok_or_else(|| ReaderError::Render(format!("Document not open: {:?}", request.doc_id)))?;

    if request.page == 0 || request.page > document.page_count {
        return Err(ReaderError::PageOutOfRange {
            page: request.page,
            total: document.page_count,
        });
    }

    let renderer = Arc::clone(&state.renderer);
    let path = document.path.clone();
    let page_index = request.page - 1;
    let scale = request.scale;

    let page = tokio::task::spawn_blocking(move || renderer.render_page(&path, page_index, scale))
        .await??;
    let page = Arc::new(page);

    state.cache.insert(&request, Arc::clone(&page));
    Ok(page)
}
