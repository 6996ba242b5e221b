use library_catalog::BookId;
use reader_runtime::worker::worker_task;
use reader_runtime::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Renderer that treats every path containing "broken" as unreadable
struct FakeRenderer {
    pages: u32,
    renders: AtomicUsize,
}

impl FakeRenderer {
    fn new(pages: u32) -> Arc<Self> {
        Arc::new(Self {
            pages,
            renders: AtomicUsize::new(0),
        })
    }
}

impl DocumentRenderer for FakeRenderer {
    fn page_count(&self, path: &Path) -> Result<u32> {
        if path.to_string_lossy().contains("broken") {
            return Err(ReaderError::Load("not a PDF".to_string()));
        }
        Ok(self.pages)
    }

    fn render_page(&self, _path: &Path, page_index: u32, scale: f32) -> Result<RenderedPage> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let side = (10.0 * scale) as usize;
        Ok(RenderedPage {
            rgba_data: vec![page_index as u8; side * side * 4],
            width: side,
            height: side,
        })
    }
}

struct Harness {
    command_tx: mpsc::UnboundedSender<ReaderCommand>,
    update_rx: mpsc::UnboundedReceiver<ReaderUpdate>,
}

impl Harness {
    fn start(renderer: Arc<FakeRenderer>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        tokio::spawn(worker_task(renderer, 8, command_rx, update_tx));
        Self {
            command_tx,
            update_rx,
        }
    }

    async fn send(&mut self, command: ReaderCommand) -> ReaderUpdate {
        self.command_tx.send(command).unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(5), self.update_rx.recv())
            .await
            .expect("worker did not answer")
            .expect("worker stopped")
    }

    async fn load(&mut self, doc_id: DocumentId, path: &str) -> ReaderUpdate {
        self.send(ReaderCommand::LoadDocument {
            doc_id,
            path: PathBuf::from(path),
        })
        .await
    }
}

fn request(doc: u64, page: u32) -> RenderRequest {
    RenderRequest {
        doc_id: DocumentId(doc),
        page,
        scale: 1.5,
    }
}

#[tokio::test]
async fn test_load_reports_page_count() {
    let mut worker = Harness::start(FakeRenderer::new(10));

    match worker.load(DocumentId(0), "/books/tafsir.pdf").await {
        ReaderUpdate::DocumentLoaded { doc_id, page_count } => {
            assert_eq!(doc_id, DocumentId(0));
            assert_eq!(page_count, 10);
        }
        other => panic!("Expected DocumentLoaded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_failure_is_reported() {
    let mut worker = Harness::start(FakeRenderer::new(10));

    match worker.load(DocumentId(3), "/books/broken.pdf").await {
        ReaderUpdate::LoadFailed { doc_id, message } => {
            assert_eq!(doc_id, DocumentId(3));
            assert!(message.contains("not a PDF"));
        }
        other => panic!("Expected LoadFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_render_uses_cache_for_repeated_pages() {
    let renderer = FakeRenderer::new(10);
    let mut worker = Harness::start(renderer.clone());
    worker.load(DocumentId(0), "/books/tafsir.pdf").await;

    for _ in 0..2 {
        match worker.send(ReaderCommand::RenderPage(request(0, 2))).await {
            ReaderUpdate::PageRendered { request: r, page } => {
                assert_eq!(r, request(0, 2));
                assert_eq!(page.width, 15);
                // Renderer pages are 0-indexed
                assert_eq!(page.rgba_data[0], 1);
            }
            other => panic!("Expected PageRendered, got {:?}", other),
        }
    }
    assert_eq!(renderer.renders.load(Ordering::SeqCst), 1);

    let zoomed = RenderRequest {
        scale: 2.0,
        ..request(0, 2)
    };
    worker.send(ReaderCommand::RenderPage(zoomed)).await;
    assert_eq!(renderer.renders.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_render_out_of_range_fails() {
    let mut worker = Harness::start(FakeRenderer::new(3));
    worker.load(DocumentId(0), "/books/tafsir.pdf").await;

    match worker.send(ReaderCommand::RenderPage(request(0, 4))).await {
        ReaderUpdate::RenderFailed { request: r, .. } => assert_eq!(r.page, 4),
        other => panic!("Expected RenderFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_closed_document_cannot_render() {
    let renderer = FakeRenderer::new(3);
    let mut worker = Harness::start(renderer.clone());
    worker.load(DocumentId(0), "/books/tafsir.pdf").await;
    worker.send(ReaderCommand::RenderPage(request(0, 1))).await;

    match worker
        .send(ReaderCommand::CloseDocument {
            doc_id: DocumentId(0),
        })
        .await
    {
        ReaderUpdate::DocumentClosed { doc_id } => assert_eq!(doc_id, DocumentId(0)),
        other => panic!("Expected DocumentClosed, got {:?}", other),
    }

    // Cached pages went with the document
    assert!(matches!(
        worker.send(ReaderCommand::RenderPage(request(0, 1))).await,
        ReaderUpdate::RenderFailed { .. }
    ));
    assert_eq!(renderer.renders.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_download_copies_document() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("tafsir.pdf");
    tokio::fs::write(&source, b"%PDF-1.4 sample").await.unwrap();
    let destination = dir.path().join("out").join("تفسير ابن كثير.pdf");

    let mut worker = Harness::start(FakeRenderer::new(1));
    match worker
        .send(ReaderCommand::DownloadBook {
            book_id: BookId(1),
            source,
            destination: destination.clone(),
        })
        .await
    {
        ReaderUpdate::DownloadComplete { book_id, path } => {
            assert_eq!(book_id, BookId(1));
            assert_eq!(path, destination);
        }
        other => panic!("Expected DownloadComplete, got {:?}", other),
    }

    let copied = tokio::fs::read(&destination).await.unwrap();
    assert_eq!(copied, b"%PDF-1.4 sample");
}

#[tokio::test]
async fn test_download_missing_source_fails() {
    let dir = TempDir::new().unwrap();
    let mut worker = Harness::start(FakeRenderer::new(1));

    let update = worker
        .send(ReaderCommand::DownloadBook {
            book_id: BookId(9),
            source: dir.path().join("missing.pdf"),
            destination: dir.path().join("copy.pdf"),
        })
        .await;
    assert!(matches!(update, ReaderUpdate::DownloadFailed { book_id: BookId(9), .. }));
}
