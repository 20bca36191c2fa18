use dashmap::DashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use warp::Filter;

use super::queue::RecencyQueue;
use crate::image::ImageRef;

pub type ImageCache = Arc<ImageCacheEmitter>;

/// Process-wide prompt -> image store. Once `capacity` keys are held, the least
/// recently used one is dropped. Last write wins.
///
/// Every entry can be served through `GET /image`, but only inline entries are handed
/// back for reuse: hosted urls expire on the provider side after a while.
pub struct ImageCacheEmitter {
    entries: DashMap<String, ImageRef>,
    recency: Mutex<RecencyQueue<String>>,
}

impl ImageCacheEmitter {
    pub fn new(capacity: usize) -> Self {
        ImageCacheEmitter {
            entries: DashMap::new(),
            recency: Mutex::new(RecencyQueue::new(capacity.max(1))),
        }
    }

    /// An inline entry that can stand in for a fresh generation; marks it as recently
    /// used. Remote entries are left alone.
    pub fn reusable(&self, key: &str) -> Option<ImageRef> {
        let mut recency = self.recency.lock().unwrap_or_else(PoisonError::into_inner);
        let image = self
            .entries
            .get(key)
            .map(|entry| entry.value().clone())
            .filter(ImageRef::is_inline)?;
        recency.touch(key.to_string());
        Some(image)
    }

    /// Looks up a key without affecting eviction order.
    pub fn peek(&self, key: &str) -> Option<ImageRef> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: String, image: ImageRef) {
        let mut recency = self.recency.lock().unwrap_or_else(PoisonError::into_inner);
        let evicted = recency.touch(key.clone());
        self.entries.insert(key, image);
        if let Some(evicted) = evicted {
            self.entries.remove(&evicted);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn create_image_cache(capacity: usize) -> ImageCache {
    Arc::new(ImageCacheEmitter::new(capacity))
}

pub fn with_cache(
    cache: ImageCache,
) -> impl Filter<Extract = (ImageCache,), Error = Infallible> + Clone {
    warp::any().map(move || cache.clone())
}
