//! The aspect cache: keyed, toggleable, explicitly evictable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use motif_model::{Entity, EntityAspect, Site};

/// Cache of [`EntityAspect`] instances keyed by `(site, entity)`.
///
/// Downstream result aggregation compares aspects by reference, so while the
/// cache is enabled, all lookups for the same key must yield the identical
/// `Arc`. The whole read-then-insert sequence runs under one lock; two
/// concurrent lookups for a new key cannot race into two diverging
/// instances.
///
/// With caching disabled, every lookup creates a fresh aspect and the stored
/// entries are left untouched until explicitly cleared.
pub struct AspectCache {
    enabled: AtomicBool,
    entries: Mutex<HashMap<String, Arc<EntityAspect>>>,
}

impl AspectCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Returns the cached aspect for `(site, entity)`, creating and storing
    /// it on first use. With caching disabled, always creates a fresh
    /// instance.
    pub fn get_or_create(&self, entity: &Arc<Entity>, site: &Arc<Site>) -> Arc<EntityAspect> {
        if !self.is_enabled() {
            return Arc::new(EntityAspect::new(Arc::clone(entity), Arc::clone(site)));
        }

        let key = EntityAspect::cache_key(site, entity);
        let mut entries = self.entries.lock().unwrap();
        Arc::clone(entries.entry(key).or_insert_with(|| {
            Arc::new(EntityAspect::new(Arc::clone(entity), Arc::clone(site)))
        }))
    }

    /// Drops the entry for `key` (see [`EntityAspect::cache_key`]); returns
    /// whether an entry existed. Used by the invalidation path when an
    /// entity or site is reloaded.
    pub fn evict(&self, key: &str) -> bool {
        self.entries.lock().unwrap().remove(key).is_some()
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for AspectCache {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_model::EntityId;

    fn fixtures() -> (Arc<Entity>, Arc<Site>) {
        (
            Arc::new(Entity::new(EntityId::new("Base", "element", "e-headline"))),
            Arc::new(Site::new("Retail")),
        )
    }

    #[test]
    fn enabled_cache_returns_identical_instance() {
        let cache = AspectCache::new(true);
        let (entity, site) = fixtures();

        let first = cache.get_or_create(&entity, &site);
        let second = cache.get_or_create(&entity, &site);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn disabled_cache_creates_distinct_instances() {
        let cache = AspectCache::new(false);
        let (entity, site) = fixtures();

        let first = cache.get_or_create(&entity, &site);
        let second = cache.get_or_create(&entity, &site);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.id_string(), second.id_string());
        assert!(cache.is_empty());
    }

    #[test]
    fn distinct_sites_get_distinct_entries() {
        let cache = AspectCache::new(true);
        let (entity, site) = fixtures();
        let other = Arc::new(Site::new("Base"));

        let retail = cache.get_or_create(&entity, &site);
        let base = cache.get_or_create(&entity, &other);
        assert!(!Arc::ptr_eq(&retail, &base));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn eviction_and_clear() {
        let cache = AspectCache::new(true);
        let (entity, site) = fixtures();
        let first = cache.get_or_create(&entity, &site);

        let key = EntityAspect::cache_key(&site, &entity);
        assert!(cache.evict(&key));
        assert!(!cache.evict(&key));

        let second = cache.get_or_create(&entity, &site);
        assert!(!Arc::ptr_eq(&first, &second));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_lookups_converge() {
        let cache = Arc::new(AspectCache::new(true));
        let (entity, site) = fixtures();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let entity = Arc::clone(&entity);
                let site = Arc::clone(&site);
                std::thread::spawn(move || cache.get_or_create(&entity, &site))
            })
            .collect();

        let aspects: Vec<Arc<EntityAspect>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(aspects.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }
}
