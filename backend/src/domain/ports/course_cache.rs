//! Port for caching assembled course details by course id.
use async_trait::async_trait;

use crate::domain::{CourseDetail, CourseId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum CourseCacheError {
        /// Cache backend is unavailable or misbehaving.
        Backend { message: String } => "course cache backend failure: {message}",
    }
}

/// Invalidation counter observed for a cache entry.
///
/// Readers capture it with [`CourseCache::generation`] before loading a
/// course from the store and hand it back to [`CourseCache::put`]. Any
/// eviction or clear in between advances the counter, so the stale detail is
/// discarded instead of stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CacheGeneration(u64);

impl CacheGeneration {
    /// Wrap a raw counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Read-through cache for [`CourseDetail`] values.
///
/// Callers evict entries whenever a course, or anything embedded in its
/// detail, changes. The eviction must follow the committed write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCache: Send + Sync {
    /// Read a cached course detail.
    async fn get(&self, id: CourseId) -> Result<Option<CourseDetail>, CourseCacheError>;

    /// Current invalidation counter for one course.
    async fn generation(&self, id: CourseId) -> Result<CacheGeneration, CourseCacheError>;

    /// Store a course detail under its course id.
    ///
    /// The detail is dropped when the entry was evicted or the cache cleared
    /// after `seen` was observed.
    async fn put(
        &self,
        detail: &CourseDetail,
        seen: CacheGeneration,
    ) -> Result<(), CourseCacheError>;

    /// Drop the entry for one course.
    async fn evict(&self, id: CourseId) -> Result<(), CourseCacheError>;

    /// Drop every entry.
    async fn clear(&self) -> Result<(), CourseCacheError>;
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCourseCache;

#[async_trait]
impl CourseCache for NoOpCourseCache {
    async fn get(&self, _id: CourseId) -> Result<Option<CourseDetail>, CourseCacheError> {
        Ok(None)
    }

    async fn generation(&self, _id: CourseId) -> Result<CacheGeneration, CourseCacheError> {
        Ok(CacheGeneration::default())
    }

    async fn put(
        &self,
        _detail: &CourseDetail,
        _seen: CacheGeneration,
    ) -> Result<(), CourseCacheError> {
        Ok(())
    }

    async fn evict(&self, _id: CourseId) -> Result<(), CourseCacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), CourseCacheError> {
        Ok(())
    }
}
