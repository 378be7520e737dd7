//! Bounded in-memory file-content cache.
//!
//! The enumerator reads every file through this cache so repeated reads
//! (ignore files, re-runs over the same corpus) are served from memory
//! while total cached bytes stay under a fixed capacity. Eviction is
//! oldest-inserted-first; a single file larger than the whole capacity
//! resets the cache instead of being retained.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::logging::ResourceMetrics;

/// Content cache keyed by root-relative path
#[derive(Debug)]
pub struct ContentCache {
    capacity: u64,
    used: u64,
    entries: HashMap<String, Arc<[u8]>>,
    insertion_order: VecDeque<String>,
    metrics: ResourceMetrics,
}

impl ContentCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            used: 0,
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            metrics: ResourceMetrics::new(),
        }
    }

    /// Read a file through the cache.
    ///
    /// `key` is the root-relative slash-separated path; `path` is where
    /// the file actually lives on disk. Returned contents stay alive in
    /// the caller even after the entry is evicted.
    pub fn read(&mut self, path: &Path, key: &str) -> io::Result<Arc<[u8]>> {
        if let Some(content) = self.entries.get(key) {
            self.metrics.record_cache_hit();
            return Ok(Arc::clone(content));
        }

        let bytes = fs::read(path)?;
        self.metrics.record_cache_miss(bytes.len() as u64);
        let content: Arc<[u8]> = Arc::from(bytes);
        self.insert(key.to_string(), Arc::clone(&content));
        Ok(content)
    }

    fn insert(&mut self, key: String, content: Arc<[u8]>) {
        let len = content.len() as u64;
        if len > self.capacity {
            debug!(bytes = len, capacity = self.capacity, "oversized entry, resetting cache");
            self.reset();
            return;
        }

        while self.used + len > self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                self.used -= evicted.len() as u64;
            }
        }

        self.used += len;
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, content);
    }

    /// Drop all entries, keeping the accumulated metrics
    pub fn reset(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
        self.used = 0;
    }

    /// Total bytes currently held
    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn metrics(&self) -> &ResourceMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn second_read_is_a_hit() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "a.txt", b"hello");
        let mut cache = ContentCache::new(1024);

        let first = cache.read(&path, "a.txt").unwrap();
        let second = cache.read(&path, "a.txt").unwrap();

        assert_eq!(&*first, b"hello");
        assert_eq!(&*second, b"hello");
        assert_eq!(cache.metrics().cache_hits(), 1);
        assert_eq!(cache.metrics().cache_misses(), 1);
        assert_eq!(cache.metrics().bytes_read(), 5);
    }

    #[test]
    fn evicts_oldest_insertion_first() {
        let dir = tempdir().unwrap();
        let a = write_file(dir.path(), "a.txt", &[b'a'; 40]);
        let b = write_file(dir.path(), "b.txt", &[b'b'; 40]);
        let c = write_file(dir.path(), "c.txt", &[b'c'; 40]);
        let mut cache = ContentCache::new(100);

        cache.read(&a, "a.txt").unwrap();
        cache.read(&b, "b.txt").unwrap();
        // 80 bytes held; inserting c must evict a, the oldest
        cache.read(&c, "c.txt").unwrap();
        assert_eq!(cache.used(), 80);

        cache.read(&b, "b.txt").unwrap();
        cache.read(&c, "c.txt").unwrap();
        assert_eq!(cache.metrics().cache_hits(), 2);

        // a was evicted, so this is a fresh miss
        cache.read(&a, "a.txt").unwrap();
        assert_eq!(cache.metrics().cache_misses(), 4);
    }

    #[test]
    fn oversized_file_resets_cache() {
        let dir = tempdir().unwrap();
        let small = write_file(dir.path(), "small.txt", &[b's'; 10]);
        let big = write_file(dir.path(), "big.txt", &[b'x'; 200]);
        let mut cache = ContentCache::new(100);

        cache.read(&small, "small.txt").unwrap();
        assert_eq!(cache.used(), 10);

        let content = cache.read(&big, "big.txt").unwrap();
        assert_eq!(content.len(), 200);
        assert_eq!(cache.used(), 0, "oversized read must reset the cache");

        // the reset dropped small.txt as well
        cache.read(&small, "small.txt").unwrap();
        assert_eq!(cache.metrics().cache_hits(), 0);
    }

    #[test]
    fn evicted_content_stays_alive_for_callers() {
        let dir = tempdir().unwrap();
        let a = write_file(dir.path(), "a.txt", &[b'a'; 60]);
        let b = write_file(dir.path(), "b.txt", &[b'b'; 60]);
        let mut cache = ContentCache::new(100);

        let held = cache.read(&a, "a.txt").unwrap();
        cache.read(&b, "b.txt").unwrap();

        assert_eq!(&*held, &[b'a'; 60][..]);
    }
}
