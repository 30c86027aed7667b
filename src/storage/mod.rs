mod cache;
mod fs;
mod registry;

pub use cache::{LruCache, ModelCache, SharedModel, UnboundedCache, cache_for};
pub use fs::FsModelStore;
pub use registry::ModelRegistry;

/// Returns a fresh, empty directory for a test's model store.
#[cfg(test)]
pub(crate) fn test_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "textlabx-unit-{}",
        crate::ids::ModelId::generate(&mut rand::rng())
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
