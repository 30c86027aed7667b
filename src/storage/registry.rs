use std::{path::PathBuf, sync::Arc};

use log::{debug, warn};
use machine_learning::TextClassifier;

use super::{FsModelStore, ModelCache, SharedModel};
use crate::{
    error::{Result, ServiceErr},
    ids::ModelId,
};

/// Resolves models by identifier, looking in the cache first and in the store second.
///
/// A model is only cached after it has been persisted or successfully read back, so every
/// cached identifier has a valid store entry.
#[derive(Clone)]
pub struct ModelRegistry {
    cache: Arc<dyn ModelCache>,
    store: FsModelStore,
}

impl ModelRegistry {
    pub fn new(cache: Arc<dyn ModelCache>, store: FsModelStore) -> Self {
        Self { cache, store }
    }

    pub fn cache(&self) -> &dyn ModelCache {
        self.cache.as_ref()
    }

    pub fn store(&self) -> &FsModelStore {
        &self.store
    }

    /// Persists a freshly trained model and caches it.
    ///
    /// # Returns
    /// The shared model and the path of its store entry.
    pub fn register(&self, id: &ModelId, model: TextClassifier) -> Result<(SharedModel, PathBuf)> {
        let path = self.store.save(id, &model)?;
        let model = Arc::new(model);
        self.cache.put(id.clone(), Arc::clone(&model));
        Ok((model, path))
    }

    /// Resolves the model addressed by `raw_id`.
    ///
    /// # Returns
    /// `NotFound` if `raw_id` is not a well formed identifier or has no store entry. Malformed
    /// identifiers never reach the filesystem.
    pub fn resolve(&self, raw_id: &str) -> Result<SharedModel> {
        let not_found = || ServiceErr::NotFound {
            model_id: raw_id.to_string(),
        };

        let Some(id) = ModelId::parse(raw_id) else {
            warn!("rejected malformed model id {raw_id:?}");
            return Err(not_found());
        };

        if let Some(model) = self.cache.get(&id) {
            return Ok(model);
        }

        debug!("cache miss for model {id}, reading the store");
        let Some(model) = self.store.load(&id)? else {
            warn!("model {id} not found in {}", self.store.dir().display());
            return Err(not_found());
        };

        let model = Arc::new(model);
        self.cache.put(id, Arc::clone(&model));
        Ok(model)
    }
}
