use serde::Serialize;

use crate::model::Dimensions;

const LARGE_MIN_WIDTH: i32 = 250;
const LARGE_MIN_HEIGHT: i32 = 180;
const MEDIUM_MIN_WIDTH: i32 = 180;
const MEDIUM_MIN_HEIGHT: i32 = 110;

/// Number of list rows the medium layout shows before the "more items" line.
pub const MEDIUM_VISIBLE_ROWS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Small,
    Medium,
    Large,
}

/// Picks the layout for a widget of the given minimum size. First match wins.
pub fn select_layout(min_width: i32, min_height: i32) -> LayoutVariant {
    if min_width >= LARGE_MIN_WIDTH && min_height >= LARGE_MIN_HEIGHT {
        LayoutVariant::Large
    } else if min_width >= MEDIUM_MIN_WIDTH && min_height >= MEDIUM_MIN_HEIGHT {
        LayoutVariant::Medium
    } else {
        LayoutVariant::Small
    }
}

impl LayoutVariant {
    pub fn for_dimensions(dims: Dimensions) -> Self {
        select_layout(dims.min_width, dims.min_height)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutVariant::Small => "small",
            LayoutVariant::Medium => "medium",
            LayoutVariant::Large => "large",
        }
    }

    pub fn policy(self) -> LayoutPolicy {
        match self {
            LayoutVariant::Small => LayoutPolicy {
                list: None,
                placeholder: false,
            },
            LayoutVariant::Medium => LayoutPolicy {
                list: Some(ListPolicy {
                    visible_cap: Some(MEDIUM_VISIBLE_ROWS),
                    more_items: true,
                }),
                placeholder: false,
            },
            LayoutVariant::Large => LayoutPolicy {
                list: Some(ListPolicy {
                    visible_cap: None,
                    more_items: false,
                }),
                placeholder: true,
            },
        }
    }
}

/// Which optional elements a layout carries and how its list behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutPolicy {
    /// `None` when the layout has no item list at all.
    pub list: Option<ListPolicy>,
    /// Whether the layout has a dedicated "no data" placeholder element.
    pub placeholder: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListPolicy {
    /// Rows shown before the remainder is summarized; `None` shows everything.
    pub visible_cap: Option<usize>,
    pub more_items: bool,
}

impl ListPolicy {
    /// Items beyond the visible cap, if this layout reports them.
    pub fn hidden_count(&self, total: usize) -> Option<usize> {
        match self.visible_cap {
            Some(cap) if self.more_items && total > cap => Some(total - cap),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
