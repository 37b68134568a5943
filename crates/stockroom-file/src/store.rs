//! JSON-file key/value medium.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use stockroom_core::Result;
use stockroom_core::error::{Error, StorageError};
use stockroom_core::store::KeyValueStore;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// A [`KeyValueStore`] persisted as one JSON object file.
///
/// Every mutation rewrites the whole file through a temp file and a rename
/// while holding an exclusive lock on a sibling `.lock` file, so a reader
/// sees either the old or the new contents and never a partial write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (without creating) the store at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&lock_path, e))?;

        Ok(lock_file)
    }

    /// Read the map; a missing or corrupt file reads as empty.
    fn read_entries(&self) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable credential file");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Corrupt credential file, ignoring");
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Encoding {
            message: e.to_string(),
        })?;

        let tmp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        {
            let mut tmp = File::create(&tmp_path).map_err(|e| map_io(&tmp_path, e))?;

            // Set restrictive permissions before any secret is written
            #[cfg(unix)]
            {
                let mut perms = tmp
                    .metadata()
                    .map_err(|e| map_io(&tmp_path, e))?
                    .permissions();
                perms.set_mode(0o600);
                fs::set_permissions(&tmp_path, perms).map_err(|e| map_io(&tmp_path, e))?;
            }

            tmp.write_all(json.as_bytes())
                .map_err(|e| map_io(&tmp_path, e))?;
            tmp.sync_all().map_err(|e| map_io(&tmp_path, e))?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            map_io(&self.path, e)
        })?;

        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let lock_file = self.lock()?;

        let mut entries = self.read_entries();
        if mutate(&mut entries) {
            self.write_entries(&entries)?;
        }

        lock_file
            .unlock()
            .map_err(|e| map_io(&self.lock_path(), e))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries().remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })?;
        debug!("Stored key");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        self.update(|entries| {
            let mut changed = false;
            for key in keys {
                changed |= entries.remove(*key).is_some();
            }
            changed
        })?;
        debug!("Removed keys");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::store::{TOKEN_KEY, USER_KEY};
    use stockroom_core::{AccessToken, Credential, CredentialStore, SessionContext};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("session.json"))
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set(TOKEN_KEY, "abc").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn remove_all_clears_every_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        store.set("theme", "dark").unwrap();

        store.remove_all(&[TOKEN_KEY, USER_KEY]).unwrap();

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_reads_empty_and_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{{{ definitely not json").unwrap();

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TOKEN_KEY, "abc").unwrap();
        store.remove_all(&[TOKEN_KEY]).unwrap();

        let leftovers: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TOKEN_KEY, "abc").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn session_logout_is_visible_after_reload() {
        let dir = TempDir::new().unwrap();
        let session = SessionContext::open(store_in(&dir)).unwrap();
        session.set_token(AccessToken::new("abc"));
        session.logout();

        let credential = CredentialStore::new(store_in(&dir)).load().unwrap();
        assert_eq!(credential, Credential::empty());
    }
}
