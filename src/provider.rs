use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::model::WidgetData;
use crate::parse::parse_snapshot;
use crate::store::SnapshotStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderState {
    Uninitialized,
    Loaded,
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("list provider has been destroyed")]
    Destroyed,
}

/// Single-line row bound to one menu item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuRow {
    pub text: String,
}

/// Position-addressable view of the menu items for the hosting list surface.
///
/// State is shared by every widget instance: the provider is not keyed by
/// widget id. It always exposes the full list; capping is up to the caller.
pub struct MenuListProvider {
    store: Arc<dyn SnapshotStore>,
    state: ProviderState,
    items: Vec<String>,
}

impl MenuListProvider {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            state: ProviderState::Uninitialized,
            items: Vec::new(),
        }
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    pub fn on_create(&mut self) -> Result<(), ProviderError> {
        self.reload()
    }

    pub fn on_data_set_changed(&mut self) -> Result<(), ProviderError> {
        self.reload()
    }

    pub fn on_destroy(&mut self) {
        self.items.clear();
        self.state = ProviderState::Destroyed;
    }

    fn reload(&mut self) -> Result<(), ProviderError> {
        if self.state == ProviderState::Destroyed {
            return Err(ProviderError::Destroyed);
        }

        let raw = match self.store.load() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "failed to read widget data");
                None
            }
        };
        self.load_from(&parse_snapshot(raw.as_deref()))
    }

    /// Replaces the items with those of an already decoded snapshot.
    pub(crate) fn load_from(&mut self, data: &WidgetData) -> Result<(), ProviderError> {
        if self.state == ProviderState::Destroyed {
            return Err(ProviderError::Destroyed);
        }
        self.items = match data.snapshot() {
            Some(snap) => snap.items.clone(),
            None => Vec::new(),
        };
        self.state = ProviderState::Loaded;

        tracing::debug!(
            items = self.items.len(),
            data = data.label(),
            "loaded menu items"
        );
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn item_at(&self, position: i64) -> Option<MenuRow> {
        let idx = usize::try_from(position).ok()?;
        self.items.get(idx).map(|text| MenuRow { text: text.clone() })
    }

    /// Ids are the position itself; stable only within one load.
    pub fn stable_id(&self, position: i64) -> i64 {
        position
    }

    pub fn has_stable_ids(&self) -> bool {
        true
    }

    pub fn view_type_count(&self) -> usize {
        1
    }

    /// The host's default loading row is used.
    pub fn loading_view(&self) -> Option<MenuRow> {
        None
    }

    pub fn rows(&self) -> impl Iterator<Item = MenuRow> + '_ {
        self.items.iter().map(|text| MenuRow { text: text.clone() })
    }
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
