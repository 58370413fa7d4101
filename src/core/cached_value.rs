//! Lazily hydrated cache cell with thread-safe invalidation.
//!
//! [`CachedValue`] holds the result of an expensive, externally validated computation
//! (running git and parsing its output). Readers of a valid cache never block; the first
//! read after an invalidation runs the hydrate callback exactly once behind a
//! per-instance lock while concurrent readers wait for that result.
//!
//! A hydration that fails leaves the cache invalid so the next read retries. An
//! invalidation that arrives while a hydration is in flight is never lost: the
//! generation counter is bumped and the in-flight result is stored without being
//! marked valid.

use crate::core::error::GitPulseError;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

type Hydrate<T, E> = Box<dyn Fn() -> Result<T, E> + Send + Sync>;

pub struct CachedValue<T, E = GitPulseError> {
    hydrate: Hydrate<T, E>,
    slot: RwLock<Option<Arc<T>>>,
    hydrating: Mutex<()>,
    valid: AtomicBool,
    generation: AtomicU64,
}

impl<T, E> CachedValue<T, E> {
    /// Create an initially invalid cache around `hydrate`
    pub fn new<F>(hydrate: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            hydrate: Box::new(hydrate),
            slot: RwLock::new(None),
            hydrating: Mutex::new(()),
            valid: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Current value, hydrating first if the cache is invalid
    pub fn value(&self) -> Result<Arc<T>, E> {
        if let Some(value) = self.peek() {
            return Ok(value);
        }

        let _hydrating = self.hydrating.lock();
        if let Some(value) = self.peek() {
            return Ok(value);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let value = Arc::new((self.hydrate)()?);

        let mut slot = self.slot.write();
        *slot = Some(Arc::clone(&value));
        if self.generation.load(Ordering::Acquire) == generation {
            self.valid.store(true, Ordering::Release);
        }
        Ok(value)
    }

    /// Value of the last completed hydration, only if the cache is still valid
    pub fn peek(&self) -> Option<Arc<T>> {
        if !self.valid.load(Ordering::Acquire) {
            return None;
        }
        self.slot.read().as_ref().map(Arc::clone)
    }

    pub fn invalidate(&self) {
        let _slot = self.slot.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.valid.store(false, Ordering::Release);
    }

    /// Invalidate and drop the stored value
    pub fn clear(&self) {
        let mut slot = self.slot.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.valid.store(false, Ordering::Release);
        *slot = None;
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Number of invalidations since construction
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl<T, E> fmt::Debug for CachedValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedValue")
            .field("valid", &self.is_valid())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn counting() -> (Arc<AtomicUsize>, CachedValue<usize, String>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = CachedValue::new(move || Ok(counter.fetch_add(1, Ordering::SeqCst) + 1));
        (calls, cache)
    }

    #[test]
    fn test_starts_invalid() {
        let (calls, cache) = counting();
        assert!(!cache.is_valid());
        assert!(cache.peek().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_hydrates_once() {
        let (calls, cache) = counting();
        assert_eq!(*cache.value().unwrap(), 1);
        assert_eq!(*cache.value().unwrap(), 1);
        assert!(cache.is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidate_rehydrates() {
        let (calls, cache) = counting();
        assert_eq!(*cache.value().unwrap(), 1);
        cache.invalidate();
        cache.invalidate();
        assert!(!cache.is_valid());
        assert_eq!(*cache.value().unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_peek_never_hydrates() {
        let (calls, cache) = counting();
        assert!(cache.peek().is_none());
        cache.value().unwrap();
        assert_eq!(cache.peek().map(|v| *v), Some(1));
        cache.invalidate();
        assert!(cache.peek().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_hydration_leaves_cache_invalid() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let cache: CachedValue<&str, String> = CachedValue::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("git failed".to_string())
            } else {
                Ok("clean")
            }
        });

        assert_eq!(cache.value().unwrap_err(), "git failed");
        assert!(!cache.is_valid());
        assert_eq!(*cache.value().unwrap(), "clean");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear_drops_value() {
        let (_, cache) = counting();
        cache.value().unwrap();
        let before = cache.generation();
        cache.clear();
        assert!(!cache.is_valid());
        assert!(cache.peek().is_none());
        assert!(cache.generation() > before);
    }

    #[test]
    fn test_concurrent_first_reads_hydrate_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache: Arc<CachedValue<usize, String>> = Arc::new(CachedValue::new(move || {
            thread::sleep(Duration::from_millis(50));
            Ok(counter.fetch_add(1, Ordering::SeqCst) + 100)
        }));

        let readers = 8;
        let barrier = Arc::new(Barrier::new(readers));
        let handles: Vec<_> = (0..readers)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    *cache.value().unwrap()
                })
            })
            .collect();

        let results: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|v| *v == 100));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalidate_during_hydration_is_not_lost() {
        let started = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let calls = Arc::new(AtomicUsize::new(0));

        let (s, r, c) = (Arc::clone(&started), Arc::clone(&release), Arc::clone(&calls));
        let cache: Arc<CachedValue<usize, String>> = Arc::new(CachedValue::new(move || {
            let call = c.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                s.wait();
                r.wait();
            }
            Ok(call)
        }));

        let reader = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || *cache.value().unwrap())
        };

        started.wait();
        cache.invalidate();
        release.wait();

        assert_eq!(reader.join().unwrap(), 0);
        assert!(!cache.is_valid());
        assert_eq!(*cache.value().unwrap(), 1);
    }
}
