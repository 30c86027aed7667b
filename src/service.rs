use std::io;

use log::info;
use machine_learning::{LinearSvcParams, TextClassifier};
use serde::Deserialize;

use crate::{
    config::Config,
    error::Result,
    ids::ModelId,
    storage::{FsModelStore, ModelRegistry, cache_for},
};

/// A labeled training example.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Example {
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

impl Example {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// The outcome of a successful training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trained {
    pub model_id: ModelId,
    /// Path, relative to the service root, where predictions against the model are served.
    pub endpoint: String,
}

/// Trains text classifiers and serves predictions from them.
///
/// Every method blocks: fitting is CPU-bound and resolving a model may read from disk.
#[derive(Clone)]
pub struct TextLab {
    registry: ModelRegistry,
    params: LinearSvcParams,
}

impl TextLab {
    pub fn new(registry: ModelRegistry, params: LinearSvcParams) -> Self {
        Self { registry, params }
    }

    /// Builds a `TextLab` from the runtime configuration, creating the model directory.
    pub fn open(config: &Config) -> io::Result<Self> {
        let store = FsModelStore::open(&config.model_dir)?;
        let cache = cache_for(config.cache_capacity);
        let params = LinearSvcParams {
            seed: config.seed,
            ..LinearSvcParams::default()
        };

        Ok(Self::new(ModelRegistry::new(cache, store), params))
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Fits a new model on `examples`, persists it and caches it under a fresh identifier.
    ///
    /// # Returns
    /// The new model's identifier, or a `Training` error if the examples are empty, hold a
    /// single category or have no usable words.
    pub fn train(&self, examples: &[Example]) -> Result<Trained> {
        let (texts, labels): (Vec<&str>, Vec<&str>) = examples
            .iter()
            .map(|e| (e.text.as_str(), e.category.as_str()))
            .unzip();

        let model = TextClassifier::fit(&texts, &labels, &self.params)?;
        let model_id = ModelId::generate(&mut rand::rng());
        let (model, path) = self.registry.register(&model_id, model)?;

        info!(
            "trained model {model_id} on {} examples, {} terms, classes {:?}, stored at {}",
            examples.len(),
            model.n_features(),
            model.classes(),
            path.display()
        );

        Ok(Trained {
            endpoint: format!("/predict/{model_id}"),
            model_id,
        })
    }

    /// Classifies `text` with the model addressed by `model_id`.
    ///
    /// # Returns
    /// The predicted category, or `NotFound` if there's no such model.
    pub fn predict(&self, model_id: &str, text: &str) -> Result<String> {
        let model = self.registry.resolve(model_id.trim())?;
        let batch = [text];
        let mut categories = model.predict(&batch[..]);
        Ok(categories.swap_remove(0))
    }
}
