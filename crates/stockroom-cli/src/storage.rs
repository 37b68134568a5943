//! Location of the saved session.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use stockroom_file::FileStore;

/// Extra key remembering which server the session belongs to.
pub const SERVER_KEY: &str = "server";

const SESSION_FILE: &str = "session.json";

/// Resolve the data directory, creating it if needed.
pub fn data_dir(overridden: Option<&Path>) -> Result<PathBuf> {
    let dir = match overridden {
        Some(dir) => dir.to_path_buf(),
        None => ProjectDirs::from("", "", "stockroom")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    Ok(dir)
}

/// Open the session file inside `dir`.
pub fn open_store(dir: &Path) -> FileStore {
    FileStore::new(dir.join(SESSION_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn override_is_created() {
        let tmp = TempDir::new().unwrap();
        let wanted = tmp.path().join("a").join("b");

        let dir = data_dir(Some(&wanted)).unwrap();

        assert_eq!(dir, wanted);
        assert!(dir.is_dir());
        assert_eq!(open_store(&dir).path(), wanted.join("session.json"));
    }
}
