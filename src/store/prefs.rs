use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{SNAPSHOT_KEY, SnapshotStore, write_atomic};

/// File-backed key-value namespace. One file per key; writes replace the file
/// by rename, so a reader sees either the old or the new value.
#[derive(Clone, Debug)]
pub struct PrefsStore {
    dir: PathBuf,
}

impl PrefsStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            anyhow::bail!("invalid preference key {:?}", key);
        }
        Ok(self.dir.join(format!("{}.pref", key)))
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
        }
    }

    pub fn put_string(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        write_atomic(&path, value.as_bytes()).with_context(|| format!("write preference {}", key))
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
        }
    }
}

impl SnapshotStore for PrefsStore {
    fn load(&self) -> Result<Option<String>> {
        self.get_string(SNAPSHOT_KEY)
    }

    fn save(&self, json: &str) -> Result<()> {
        self.put_string(SNAPSHOT_KEY, json)
    }
}
