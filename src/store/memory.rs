use std::sync::RwLock;

use anyhow::{Result, anyhow};

use super::SnapshotStore;

/// In-process snapshot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(json.into())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .value
            .read()
            .map_err(|_| anyhow!("snapshot lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, json: &str) -> Result<()> {
        let mut guard = self
            .value
            .write()
            .map_err(|_| anyhow!("snapshot lock poisoned"))?;
        *guard = Some(json.to_string());
        Ok(())
    }
}
