use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the hosting platform assigns to a placed widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub u32);

impl WidgetId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-reported minimum size of a widget instance, in density-independent units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub min_width: i32,
    pub min_height: i32,
}

impl Dimensions {
    pub fn new(min_width: i32, min_height: i32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }
}
