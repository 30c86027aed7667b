use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use machine_learning::TextClassifier;

use crate::{
    error::{Result, ServiceErr},
    ids::ModelId,
};

const FILE_PREFIX: &str = "modelo_";
const FILE_EXTENSION: &str = "json";

/// A flat directory holding one JSON file per trained model.
///
/// Membership is decided by file existence alone, there is no index.
#[derive(Debug, Clone)]
pub struct FsModelStore {
    dir: PathBuf,
}

impl FsModelStore {
    /// Opens the store at `dir`, creating the directory if it's missing.
    pub fn open<P: Into<PathBuf>>(dir: P) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path where the model `id` is stored.
    pub fn path_for(&self, id: &ModelId) -> PathBuf {
        self.dir
            .join(format!("{FILE_PREFIX}{id}.{FILE_EXTENSION}"))
    }

    /// Serializes `model` under `id`, replacing any previous entry.
    ///
    /// The file is written next to its final path and then renamed, so readers never observe
    /// a partially written model. A failed save leaves no temporary file behind.
    pub fn save(&self, id: &ModelId, model: &TextClassifier) -> Result<PathBuf> {
        let path = self.path_for(id);
        let tmp = self.tmp_path_for(id);

        if let Err(e) = write_then_rename(&tmp, &path, model) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(path)
    }

    fn tmp_path_for(&self, id: &ModelId) -> PathBuf {
        self.dir
            .join(format!(".{FILE_PREFIX}{id}.{FILE_EXTENSION}.tmp"))
    }

    /// Loads the model stored under `id`.
    ///
    /// # Returns
    /// `None` if there is no entry for `id`, or `CorruptModel` if the entry can't be decoded.
    pub fn load(&self, id: &ModelId) -> Result<Option<TextClassifier>> {
        let raw = match fs::read(self.path_for(id)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| ServiceErr::CorruptModel {
                model_id: id.to_string(),
                source,
            })
    }

    pub fn contains(&self, id: &ModelId) -> bool {
        self.path_for(id).is_file()
    }
}

fn write_then_rename(tmp: &Path, path: &Path, model: &TextClassifier) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(tmp)?);
    serde_json::to_writer(&mut writer, model).map_err(io::Error::from)?;
    writer.flush()?;
    drop(writer);

    fs::rename(tmp, path)
}

#[cfg(test)]
mod tests {
    use machine_learning::LinearSvcParams;

    use super::*;
    use crate::storage::test_dir;

    fn model() -> TextClassifier {
        let texts = ["buen dia", "mal dia"];
        let labels = ["bueno", "malo"];
        TextClassifier::fit(&texts, &labels, &LinearSvcParams::seeded(0)).unwrap()
    }

    #[test]
    fn test_path_layout() {
        let store = FsModelStore::open(test_dir()).unwrap();
        let id = ModelId::parse("1234abcd").unwrap();

        assert_eq!(
            store.path_for(&id),
            store.dir().join("modelo_1234abcd.json")
        );
    }

    #[test]
    fn test_save_then_load() {
        let store = FsModelStore::open(test_dir()).unwrap();
        let id = ModelId::parse("1234abcd").unwrap();

        assert!(!store.contains(&id));
        let path = store.save(&id, &model()).unwrap();
        assert!(path.is_file());
        assert!(store.contains(&id));

        let loaded = store.load(&id).unwrap().unwrap();
        assert_eq!(loaded.predict_one("buen dia"), "bueno");
        assert_eq!(loaded.classes(), model().classes());
    }

    #[test]
    fn test_failed_save_removes_temporary_file() {
        let store = FsModelStore::open(test_dir()).unwrap();
        let id = ModelId::parse("5ca1ab1e").unwrap();

        // a non empty directory at the final path makes the rename fail
        fs::create_dir_all(store.path_for(&id).join("occupied")).unwrap();

        let err = store.save(&id, &model()).unwrap_err();
        assert!(matches!(err, ServiceErr::Io(_)));
        assert!(!store.tmp_path_for(&id).exists());
        assert!(!store.contains(&id));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let store = FsModelStore::open(test_dir()).unwrap();
        let id = ModelId::parse("deadbeef").unwrap();
        assert!(store.load(&id).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let store = FsModelStore::open(test_dir()).unwrap();
        let id = ModelId::parse("0badf00d").unwrap();
        fs::write(store.path_for(&id), b"{not json").unwrap();

        let err = store.load(&id).unwrap_err();
        assert!(matches!(err, ServiceErr::CorruptModel { model_id, .. } if model_id == "0badf00d"));
    }
}
