//! Durable store backed by a single JSON file.
//!
//! The whole map is loaded on open and rewritten on every mutation through a
//! temporary file and a rename, so a crash never leaves a half-written store.
//! A mutation that cannot be written leaves the in-memory map untouched. A
//! file that fails to parse is logged and replaced by an empty map on the
//! next write.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{KeyValueStore, StoreError};

const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: Mutex<BTreeMap<String, String>>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl FileStore {
    /// Open (or lazily create) `store.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if an existing file cannot be read.
    pub fn open_in(dir: &Path) -> Result<Self, StoreError> {
        Self::open(dir.join(STORE_FILE_NAME))
    }

    /// Open the store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if an existing file cannot be read.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let map = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(io_error(&path))?;
            serde_json::from_str(&raw).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "store file is corrupt; starting empty");
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            map: Mutex::new(map),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` to a copy of the map and adopt the copy only once it
    /// is on disk. `change` returns `false` when there is nothing to write.
    fn commit(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StoreError> {
        let mut map = self.map();
        let mut next = map.clone();
        if !change(&mut next) {
            return Ok(());
        }
        self.flush(&next)?;
        *map = next;
        Ok(())
    }

    fn flush(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let body = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(io_error(&tmp))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600)) {
                tracing::warn!("failed to chmod 0600 {}: {e}", tmp.display());
            }
        }

        fs::rename(&tmp, &self.path).map_err(io_error(&self.path))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.commit(|map| {
            map.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.commit(|map| map.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.map().keys().cloned().collect())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Option<String>,
    ) -> Result<(), StoreError> {
        self.commit(|map| {
            match f(map.get(key).cloned()) {
                Some(next) => {
                    map.insert(key.to_string(), next);
                }
                None => {
                    map.remove(key);
                }
            }
            true
        })
    }
}
