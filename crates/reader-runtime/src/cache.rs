use crate::renderer::RenderedPage;
use crate::{DocumentId, RenderRequest};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Scale stored in hundredths so the key is hashable
type CacheKey = (DocumentId, u32, u32);

fn cache_key(request: &RenderRequest) -> CacheKey {
    (
        request.doc_id,
        request.page,
        (request.scale * 100.0).round() as u32,
    )
}

/// LRU cache of rendered pages, keyed by document, page and scale
pub struct PageCache {
    capacity: usize,
    pages: HashMap<CacheKey, Arc<RenderedPage>>,
    order: VecDeque<CacheKey>,
}

impl PageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            pages: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn insert(&mut self, request: &RenderRequest, page: Arc<RenderedPage>) {
        let key = cache_key(request);

        if self.pages.contains_key(&key) {
            self.order.retain(|k| k != &key);
        }

        while self.order.len() >= self.capacity {
            if let Some(old_key) = self.order.pop_front() {
                self.pages.remove(&old_key);
            }
        }

        self.pages.insert(key, page);
        self.order.push_back(key);
    }

    pub fn get(&mut self, request: &RenderRequest) -> Option<Arc<RenderedPage>> {
        let key = cache_key(request);
        let page = self.pages.get(&key)?.clone();

        self.order.retain(|k| k != &key);
        self.order.push_back(key);
        Some(page)
    }

    /// Drop every cached page of a document
    pub fn remove_document(&mut self, doc_id: DocumentId) {
        self.order.retain(|(id, _, _)| *id != doc_id);
        self.pages.retain(|(id, _, _), _| *id != doc_id);
    }
}
