//! In-process course detail cache.
//!
//! `InMemoryCourseCache` implements the [`CourseCache`] port with a bounded
//! map. When full, the oldest inserted entry is dropped to make room.
//!
//! Every eviction or clear advances a cache-wide counter and records it
//! against the affected ids. A `put` carrying a generation older than the
//! entry's last invalidation is discarded.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CacheGeneration, CourseCache, CourseCacheError};
use crate::domain::{CourseDetail, CourseId};

#[derive(Debug, Default)]
struct Entries {
    details: HashMap<CourseId, CourseDetail>,
    order: VecDeque<CourseId>,
    counter: u64,
    cleared_at: u64,
    invalidated_at: HashMap<CourseId, u64>,
}

impl Entries {
    fn remove(&mut self, id: CourseId) {
        if self.details.remove(&id).is_some() {
            self.order.retain(|queued| *queued != id);
        }
    }

    fn invalidate(&mut self, id: CourseId) {
        self.counter += 1;
        self.invalidated_at.insert(id, self.counter);
        self.remove(id);
    }

    fn invalidate_all(&mut self) {
        self.counter += 1;
        self.cleared_at = self.counter;
        self.invalidated_at.clear();
        self.details.clear();
        self.order.clear();
    }

    fn is_stale(&self, id: CourseId, seen: CacheGeneration) -> bool {
        let last = self
            .invalidated_at
            .get(&id)
            .copied()
            .unwrap_or(0)
            .max(self.cleared_at);
        last > seen.get()
    }
}

/// Bounded in-memory cache of assembled course details.
#[derive(Debug)]
pub struct InMemoryCourseCache {
    capacity: usize,
    entries: RwLock<Entries>,
}

impl InMemoryCourseCache {
    /// Create a cache holding at most `capacity` course details.
    ///
    /// A capacity of zero stores nothing.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Number of cached details.
    pub async fn len(&self) -> usize {
        self.entries.read().await.details.len()
    }

    /// Return true when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CourseCache for InMemoryCourseCache {
    async fn get(&self, id: CourseId) -> Result<Option<CourseDetail>, CourseCacheError> {
        Ok(self.entries.read().await.details.get(&id).cloned())
    }

    async fn generation(&self, _id: CourseId) -> Result<CacheGeneration, CourseCacheError> {
        Ok(CacheGeneration::new(self.entries.read().await.counter))
    }

    async fn put(
        &self,
        detail: &CourseDetail,
        seen: CacheGeneration,
    ) -> Result<(), CourseCacheError> {
        if self.capacity == 0 {
            return Ok(());
        }
        let id = detail.course.id;
        let mut entries = self.entries.write().await;
        if entries.is_stale(id, seen) {
            return Ok(());
        }
        entries.remove(id);
        while entries.details.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.details.remove(&oldest);
        }
        entries.details.insert(id, detail.clone());
        entries.order.push_back(id);
        Ok(())
    }

    async fn evict(&self, id: CourseId) -> Result<(), CourseCacheError> {
        self.entries.write().await.invalidate(id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CourseCacheError> {
        self.entries.write().await.invalidate_all();
        Ok(())
    }
}
