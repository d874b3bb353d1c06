use std::sync::Arc;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::layout::LayoutVariant;
use crate::model::{
    Dimensions, InstanceRecord, InstanceRegistry, WidgetConfig, WidgetData, WidgetId,
};
use crate::parse::parse_snapshot;
use crate::populate::{RenderState, populate};
use crate::provider::{MenuListProvider, MenuRow, ProviderState};
use crate::store::{MealStore, SnapshotStore};

mod requests;

pub use self::requests::{DataRequest, DataRequestSink, MemorySink, RequestLog, RequestReason};

/// Signals delivered to the widget host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Broadcast {
    /// Platform update for the listed instances.
    AppWidgetUpdate(Vec<WidgetId>),
    /// The host application's own refresh action; ignored without ids.
    RelayUpdate(Option<Vec<WidgetId>>),
    BootCompleted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(usize),
    NoWidgets,
}

impl UpdateOutcome {
    pub fn message(&self) -> String {
        match self {
            UpdateOutcome::Updated(n) => format!("Widget update broadcast sent for {} widgets", n),
            UpdateOutcome::NoWidgets => "No widgets found to update".to_string(),
        }
    }
}

/// Output of one render pass for one instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedWidget {
    pub id: WidgetId,
    pub variant: LayoutVariant,
    pub state: RenderState,
    /// Rows the bound list surface would show, uncapped.
    pub rows: Vec<MenuRow>,
}

/// The widget side of the refresh relay: knows the placed instances, renders
/// them from the snapshot store, and asks the host application for data.
pub struct WidgetHost {
    snapshots: Arc<dyn SnapshotStore>,
    sink: Arc<dyn DataRequestSink>,
    config: WidgetConfig,
    registry: InstanceRegistry,
    persist: Option<MealStore>,
    provider: MenuListProvider,
}

impl WidgetHost {
    pub fn new(
        snapshots: Arc<dyn SnapshotStore>,
        sink: Arc<dyn DataRequestSink>,
        config: WidgetConfig,
    ) -> Self {
        let provider = MenuListProvider::new(snapshots.clone());
        Self {
            snapshots,
            sink,
            config,
            registry: InstanceRegistry {
                version: 1,
                instances: Default::default(),
            },
            persist: None,
            provider,
        }
    }

    /// Host backed by an on-disk store; instance changes are written back.
    pub fn open(store: &MealStore) -> Result<Self> {
        let config = store.read_config()?;
        let registry = store.read_instances()?;
        let sink = Arc::new(RequestLog::new(store.requests_path()));
        let mut host = Self::new(store.snapshot_store(), sink, config);
        host.registry = registry;
        host.persist = Some(store.clone());
        Ok(host)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn instances(&self) -> impl Iterator<Item = (WidgetId, &InstanceRecord)> {
        self.registry.instances.iter().map(|(id, rec)| (*id, rec))
    }

    pub fn widget_info(&self) -> usize {
        self.registry.instances.len()
    }

    pub fn provider(&self) -> &MenuListProvider {
        &self.provider
    }

    pub fn place(&mut self, id: WidgetId, dims: Dimensions) -> Result<()> {
        self.registry
            .instances
            .entry(id)
            .and_modify(|rec| rec.dimensions = dims)
            .or_insert(InstanceRecord {
                dimensions: dims,
                configured_at: None,
            });
        self.save_registry()
    }

    pub fn remove(&mut self, id: WidgetId) -> Result<bool> {
        let existed = self.registry.instances.remove(&id).is_some();
        if existed {
            self.save_registry()?;
        }
        Ok(existed)
    }

    /// Confirm path of the configuration screen.
    pub fn configure(&mut self, id: WidgetId, dims: Dimensions) -> Result<RenderedWidget> {
        self.place(id, dims)?;
        if let Some(rec) = self.registry.instances.get_mut(&id) {
            rec.configured_at = Some(requests::now_ts());
        }
        self.save_registry()?;
        self.send_request(DataRequest::new(Some(id), RequestReason::Configured));

        self.render_instance(id)
            .ok_or_else(|| anyhow!("widget {} vanished during configuration", id))
    }

    pub fn on_receive(&mut self, broadcast: Broadcast) -> Vec<RenderedWidget> {
        match broadcast {
            Broadcast::AppWidgetUpdate(ids) => self.on_update(&ids),
            Broadcast::RelayUpdate(Some(ids)) => self.on_update(&ids),
            Broadcast::RelayUpdate(None) => Vec::new(),
            Broadcast::BootCompleted => self.boot_completed(),
        }
    }

    pub fn on_update(&mut self, ids: &[WidgetId]) -> Vec<RenderedWidget> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match self.render_instance(*id) {
                Some(rendered) => out.push(rendered),
                None => tracing::warn!(widget = %id, "update for unknown widget"),
            }
        }
        out
    }

    pub fn update_all(&mut self) -> Vec<RenderedWidget> {
        let ids: Vec<WidgetId> = self.registry.instances.keys().copied().collect();
        self.on_update(&ids)
    }

    pub fn boot_completed(&mut self) -> Vec<RenderedWidget> {
        if self.registry.instances.is_empty() {
            return Vec::new();
        }
        tracing::debug!("boot completed, updating widgets");
        let rendered = self.update_all();
        self.send_request(DataRequest::new(None, RequestReason::Boot));
        rendered
    }

    /// Bridge call from the host application after it pushed new data.
    pub fn update_widgets(&mut self) -> (UpdateOutcome, Vec<RenderedWidget>) {
        if self.registry.instances.is_empty() {
            tracing::debug!("no widgets found to update");
            return (UpdateOutcome::NoWidgets, Vec::new());
        }
        let rendered = self.update_all();
        tracing::info!(widgets = rendered.len(), "widget update broadcast sent");
        (UpdateOutcome::Updated(rendered.len()), rendered)
    }

    /// Generic nudge towards the host application.
    pub fn request_refresh(&self, id: Option<WidgetId>) {
        self.send_request(DataRequest::new(id, RequestReason::Manual));
    }

    /// Renders one placed instance; `None` if the id is unknown.
    pub fn render_instance(&mut self, id: WidgetId) -> Option<RenderedWidget> {
        let dims = self.registry.instances.get(&id)?.dimensions;
        Some(self.render(id, dims))
    }

    /// Renders a widget of the given size without consulting the registry.
    pub fn render(&mut self, id: WidgetId, dims: Dimensions) -> RenderedWidget {
        let variant = LayoutVariant::for_dimensions(dims);

        let raw = match self.snapshots.load() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "failed to read widget data");
                None
            }
        };
        let data = parse_snapshot(raw.as_deref());
        let state = populate(variant, &data, &self.config);

        if raw.is_none() {
            self.send_request(DataRequest::new(Some(id), RequestReason::NoData));
        }

        let rows = if state.list.is_some() {
            self.refresh_provider(&data);
            self.provider.rows().collect()
        } else {
            Vec::new()
        };

        tracing::debug!(widget = %id, variant = variant.as_str(), data = data.label(), "rendered widget");
        RenderedWidget {
            id,
            variant,
            state,
            rows,
        }
    }

    // Rows come from the snapshot decoded by this render.
    fn refresh_provider(&mut self, data: &WidgetData) {
        if self.provider.state() == ProviderState::Destroyed {
            self.provider = MenuListProvider::new(self.snapshots.clone());
        }
        let res = self.provider.load_from(data);
        if let Err(err) = res {
            tracing::warn!(error = %err, "list provider reload failed");
        }
    }

    fn send_request(&self, req: DataRequest) {
        let reason = req.reason;
        if let Err(err) = self.sink.request_data(req) {
            tracing::warn!(error = %format!("{:#}", err), ?reason, "failed to send data request");
        }
    }

    fn save_registry(&self) -> Result<()> {
        match &self.persist {
            Some(store) => store.write_instances(&self.registry),
            None => Ok(()),
        }
    }
}

impl Drop for WidgetHost {
    fn drop(&mut self) {
        self.provider.on_destroy();
    }
}

#[cfg(test)]
#[path = "tests/relay_tests.rs"]
mod tests;
