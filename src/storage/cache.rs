use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use machine_learning::TextClassifier;
use parking_lot::{Mutex, RwLock};

use crate::ids::ModelId;

/// A fitted model shared between concurrent requests.
pub type SharedModel = Arc<TextClassifier>;

/// In-memory lookup of loaded models by identifier.
///
/// Implementations must be safe to share between request handlers. Concurrent `put`s of the
/// same identifier are allowed, the last one wins.
pub trait ModelCache: Send + Sync {
    fn get(&self, id: &ModelId) -> Option<SharedModel>;

    fn put(&self, id: ModelId, model: SharedModel);

    /// Drops every cached model. The store is left untouched.
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the cache for a configured capacity: unbounded when `None`, LRU otherwise.
pub fn cache_for(capacity: Option<NonZeroUsize>) -> Arc<dyn ModelCache> {
    match capacity {
        Some(capacity) => Arc::new(LruCache::new(capacity)),
        None => Arc::new(UnboundedCache::new()),
    }
}

/// A cache that keeps every model for the lifetime of the process.
#[derive(Debug, Default)]
pub struct UnboundedCache {
    models: RwLock<HashMap<ModelId, SharedModel>>,
}

impl UnboundedCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelCache for UnboundedCache {
    fn get(&self, id: &ModelId) -> Option<SharedModel> {
        self.models.read().get(id).cloned()
    }

    fn put(&self, id: ModelId, model: SharedModel) {
        self.models.write().insert(id, model);
    }

    fn clear(&self) {
        self.models.write().clear();
    }

    fn len(&self) -> usize {
        self.models.read().len()
    }
}

#[derive(Debug, Default)]
struct LruEntries {
    tick: u64,
    models: HashMap<ModelId, (SharedModel, u64)>,
}

impl LruEntries {
    fn touch(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .models
            .iter()
            .min_by_key(|(_, (_, used))| *used)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            log::debug!("evicting model {id} from the cache");
            self.models.remove(&id);
        }
    }
}

/// A cache holding at most `capacity` models, evicting the least recently used one.
#[derive(Debug)]
pub struct LruCache {
    capacity: NonZeroUsize,
    entries: Mutex<LruEntries>,
}

impl LruCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(LruEntries::default()),
        }
    }
}

impl ModelCache for LruCache {
    fn get(&self, id: &ModelId) -> Option<SharedModel> {
        let mut entries = self.entries.lock();
        let tick = entries.touch();

        entries.models.get_mut(id).map(|(model, used)| {
            *used = tick;
            Arc::clone(model)
        })
    }

    fn put(&self, id: ModelId, model: SharedModel) {
        let mut entries = self.entries.lock();
        let tick = entries.touch();

        if !entries.models.contains_key(&id) && entries.models.len() >= self.capacity.get() {
            entries.evict_oldest();
        }

        entries.models.insert(id, (model, tick));
    }

    fn clear(&self) {
        self.entries.lock().models.clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().models.len()
    }
}

#[cfg(test)]
mod tests {
    use machine_learning::LinearSvcParams;

    use super::*;

    fn model() -> SharedModel {
        let texts = ["buen dia", "mal dia"];
        let labels = ["bueno", "malo"];
        Arc::new(TextClassifier::fit(&texts, &labels, &LinearSvcParams::seeded(0)).unwrap())
    }

    fn id(raw: &str) -> ModelId {
        ModelId::parse(raw).unwrap()
    }

    #[test]
    fn test_unbounded_get_put_clear() {
        let cache = UnboundedCache::new();
        let m = model();

        assert!(cache.get(&id("00000001")).is_none());
        cache.put(id("00000001"), Arc::clone(&m));
        assert!(Arc::ptr_eq(&cache.get(&id("00000001")).unwrap(), &m));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        let m = model();

        cache.put(id("0000000a"), Arc::clone(&m));
        cache.put(id("0000000b"), Arc::clone(&m));
        assert!(cache.get(&id("0000000a")).is_some());

        cache.put(id("0000000c"), Arc::clone(&m));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&id("0000000a")).is_some());
        assert!(cache.get(&id("0000000b")).is_none());
        assert!(cache.get(&id("0000000c")).is_some());
    }

    #[test]
    fn test_lru_reinsert_does_not_evict() {
        let cache = LruCache::new(NonZeroUsize::new(1).unwrap());
        let m = model();

        cache.put(id("0000000a"), Arc::clone(&m));
        cache.put(id("0000000a"), Arc::clone(&m));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&id("0000000a")).is_some());
    }

    #[test]
    fn test_cache_for_capacity() {
        let cache = cache_for(NonZeroUsize::new(1));
        cache.put(id("0000000a"), model());
        cache.put(id("0000000b"), model());
        assert_eq!(cache.len(), 1);

        let cache = cache_for(None);
        cache.put(id("0000000a"), model());
        cache.put(id("0000000b"), model());
        assert_eq!(cache.len(), 2);
    }
}
