mod config;
mod ids;
mod snap;

pub use self::config::{
    DateLocale, InstanceRecord, InstanceRegistry, Labels, Theme, WidgetConfig,
};
pub use self::ids::{Dimensions, WidgetId};
pub use self::snap::{MealKind, Snapshot, WidgetData};
