//! Home-screen meal menu widget: layout selection, snapshot decoding, view
//! state derivation and the menu list provider, plus the host-side relay
//! that keeps placed widgets fresh.

pub mod layout;
pub mod logging;
pub mod model;
pub mod parse;
pub mod populate;
pub mod provider;
pub mod relay;
pub mod render;
pub mod store;
pub mod tui;

pub use layout::{LayoutVariant, select_layout};
pub use model::{Snapshot, WidgetData};
pub use parse::{format_meal_date, parse_snapshot};
pub use populate::{RenderState, ViewElement, populate};
pub use provider::MenuListProvider;
pub use store::{SnapshotStore, set_snapshot};
