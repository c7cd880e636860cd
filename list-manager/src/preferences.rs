//! Persisted column preferences, one named slot per list view.
//!
//! Persistence is best effort: [`Preferences`] swallows every storage error
//! and the list view keeps working with its in-memory state.
use dashmap::DashMap;
use log::warn;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Storage I/O: {0}")]
    Io(#[from] io::Error),
    #[error("Stored preference is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid storage key '{0}', only ASCII alphanumerics, `_` & `-` are allowed")]
    InvalidKey(String),
}

/// Storage of named slots, each holding a list of column keys.
pub trait PreferenceStore: fmt::Debug + Send + Sync {
    /// `Ok(None)` when nothing is stored under the key.
    fn read(&self, key: &str) -> Result<Option<Vec<String>>, Error>;

    fn write(&self, key: &str, columns: &[String]) -> Result<(), Error>;
}

/// Keeps the slots in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: DashMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<String>>, Error> {
        Ok(self.slots.get(key).map(|columns| columns.value().clone()))
    }

    fn write(&self, key: &str, columns: &[String]) -> Result<(), Error> {
        self.slots.insert(key.to_string(), columns.to_vec());

        Ok(())
    }
}

/// Stores every slot as a `<key>.json` file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, Error> {
        let is_valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if is_valid {
            Ok(self.dir.join(format!("{key}.json")))
        } else {
            Err(Error::InvalidKey(key.to_string()))
        }
    }
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<String>>, Error> {
        let content = match fs::read_to_string(self.slot_path(key)?) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write(&self, key: &str, columns: &[String]) -> Result<(), Error> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, serde_json::to_vec(columns)?)?;

        Ok(())
    }
}

/// Best effort access to a [`PreferenceStore`].
#[derive(Debug, Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Preferences which are lost with the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The stored columns, `None` if there are none or they can't be read.
    pub fn load(&self, key: &str) -> Option<Vec<String>> {
        self.store.read(key).unwrap_or_else(|err| {
            warn!("Failed to read column preferences '{key}': {err}");

            None
        })
    }

    pub fn save(&self, key: &str, columns: &[String]) {
        if let Err(err) = self.store.write(key, columns) {
            warn!("Failed to store column preferences '{key}': {err}");
        }
    }
}
