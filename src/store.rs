use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result, anyhow};

use crate::model::{InstanceRegistry, WidgetConfig};

mod memory;
mod prefs;

pub use self::memory::MemoryStore;
pub use self::prefs::PrefsStore;

const STORE_DIR: &str = ".mealwidget";

/// Key of the snapshot record inside the preferences namespace.
pub const SNAPSHOT_KEY: &str = "meal_widget_data";

/// Holder of the single latest snapshot.
///
/// Values are opaque JSON text; validation happens when a render pass reads
/// them. Implementations must make `save` atomic with respect to `load`.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, json: &str) -> Result<()>;
}

/// Push interface for the host application: stores `json` as the latest snapshot.
pub fn set_snapshot(store: &dyn SnapshotStore, json: &str) -> Result<()> {
    match store.save(json) {
        Ok(()) => {
            tracing::info!(bytes = json.len(), "widget data saved");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %format!("{:#}", err), "failed to save widget data");
            Err(err.context("save widget data"))
        }
    }
}

/// On-disk home of one widget installation: config, placed instances,
/// the preferences namespace and the data request log.
#[derive(Clone)]
pub struct MealStore {
    root: PathBuf,
}

impl MealStore {
    pub fn store_dir(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(anyhow!(
                "No widget store found at {} (run `mealwidget init`)",
                root.display()
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn init(root: &Path, force: bool) -> Result<Self> {
        if root.join("config.json").exists() && !force {
            return Err(anyhow!(
                "widget store already exists at {} (use --force to re-init)",
                root.display()
            ));
        }

        fs::create_dir_all(root.join("prefs")).context("create prefs dir")?;

        let store = Self {
            root: root.to_path_buf(),
        };
        store.write_config(&WidgetConfig::default())?;
        store.write_instances(&InstanceRegistry {
            version: 1,
            instances: Default::default(),
        })?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prefs(&self) -> PrefsStore {
        PrefsStore::new(self.root.join("prefs"))
    }

    pub fn snapshot_store(&self) -> Arc<dyn SnapshotStore> {
        Arc::new(self.prefs())
    }

    pub fn requests_path(&self) -> PathBuf {
        self.root.join("requests.jsonl")
    }

    pub fn read_config(&self) -> Result<WidgetConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(WidgetConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: WidgetConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported widget config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &WidgetConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_instances(&self) -> Result<InstanceRegistry> {
        let path = self.root.join("instances.json");
        if !path.exists() {
            return Ok(InstanceRegistry {
                version: 1,
                instances: Default::default(),
            });
        }
        let bytes = fs::read(&path).context("read instances.json")?;
        let reg: InstanceRegistry =
            serde_json::from_slice(&bytes).context("parse instances.json")?;
        if reg.version != 1 {
            anyhow::bail!("unsupported instance registry version {}", reg.version);
        }
        Ok(reg)
    }

    pub fn write_instances(&self, reg: &InstanceRegistry) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(reg).context("serialize instances")?;
        write_atomic(&self.root.join("instances.json"), &bytes)
            .context("write instances.json")?;
        Ok(())
    }
}

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("tmp.{}.{}", std::process::id(), seq));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
