use std::collections::BTreeMap;

use serde::Serialize;

use crate::layout::{LayoutVariant, ListPolicy};
use crate::model::{MealKind, Snapshot, WidgetConfig, WidgetData};
use crate::parse::format_meal_date;

/// Named elements of the widget layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewElement {
    MealType,
    Date,
    Location,
    MenuList,
    MoreItems,
    NoData,
}

impl ViewElement {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewElement::MealType => "meal_type",
            ViewElement::Date => "date",
            ViewElement::Location => "location",
            ViewElement::MenuList => "menu_list",
            ViewElement::MoreItems => "more_items",
            ViewElement::NoData => "no_data",
        }
    }
}

/// What a render pass set on one element. Unset parts keep the layout default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElementState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Binds the menu list element to the list data provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ListBinding {
    /// Element the host shows instead of the list when the provider yields no rows.
    pub empty_view: ViewElement,
    pub visible_cap: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaunchAction {
    pub target: String,
}

/// Computed text and visibility values for one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderState {
    pub elements: BTreeMap<ViewElement, ElementState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch: Option<LaunchAction>,
}

impl RenderState {
    pub fn set_text(&mut self, el: ViewElement, text: impl Into<String>) {
        self.elements.entry(el).or_default().text = Some(text.into());
    }

    pub fn set_visible(&mut self, el: ViewElement, visible: bool) {
        self.elements.entry(el).or_default().visible = Some(visible);
    }

    pub fn text(&self, el: ViewElement) -> Option<&str> {
        self.elements.get(&el).and_then(|s| s.text.as_deref())
    }

    /// `None` when the render pass left the element's visibility untouched.
    pub fn visibility(&self, el: ViewElement) -> Option<bool> {
        self.elements.get(&el).and_then(|s| s.visible)
    }

    /// Visible unless explicitly hidden.
    pub fn is_shown(&self, el: ViewElement) -> bool {
        self.visibility(el).unwrap_or(true)
    }
}

/// Computes the render state for one widget of `variant` from `data`.
pub fn populate(variant: LayoutVariant, data: &WidgetData, config: &WidgetConfig) -> RenderState {
    let mut state = RenderState::default();
    match data.snapshot() {
        Some(snap) => populate_snapshot(&mut state, variant, snap, config),
        None => populate_empty(&mut state, variant, config),
    }

    state.launch = config
        .launch_target
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|target| LaunchAction {
            target: target.clone(),
        });
    state
}

fn populate_empty(state: &mut RenderState, variant: LayoutVariant, config: &WidgetConfig) {
    let policy = variant.policy();

    state.set_text(ViewElement::MealType, config.labels.widget_name.as_str());
    state.set_text(ViewElement::Date, config.labels.no_data.as_str());
    state.set_visible(ViewElement::Location, false);

    if let Some(list) = policy.list {
        state.set_visible(ViewElement::MenuList, false);
        if list.more_items {
            state.set_visible(ViewElement::MoreItems, false);
        }
    }
    if policy.placeholder {
        state.set_visible(ViewElement::NoData, true);
    }
}

fn populate_snapshot(
    state: &mut RenderState,
    variant: LayoutVariant,
    snap: &Snapshot,
    config: &WidgetConfig,
) {
    let policy = variant.policy();

    let meal_label = match snap.meal_kind() {
        MealKind::Breakfast => &config.labels.breakfast,
        MealKind::Dinner => &config.labels.dinner,
    };
    state.set_text(ViewElement::MealType, meal_label.as_str());
    state.set_text(
        ViewElement::Date,
        format_meal_date(&snap.meal_date, config.date_locale),
    );

    match snap.location() {
        Some(city) => {
            state.set_visible(ViewElement::Location, true);
            state.set_text(ViewElement::Location, city);
        }
        None => state.set_visible(ViewElement::Location, false),
    }

    if let Some(list) = policy.list {
        populate_list(state, list, policy.placeholder, snap.items.len(), config);
    }
}

fn populate_list(
    state: &mut RenderState,
    list: ListPolicy,
    placeholder: bool,
    total: usize,
    config: &WidgetConfig,
) {
    let has_items = total > 0;
    state.set_visible(ViewElement::MenuList, has_items);
    if has_items {
        state.list = Some(ListBinding {
            empty_view: if placeholder {
                ViewElement::NoData
            } else {
                ViewElement::MoreItems
            },
            visible_cap: list.visible_cap,
        });
    }

    if list.more_items {
        match list.hidden_count(total) {
            Some(hidden) => {
                state.set_visible(ViewElement::MoreItems, true);
                state.set_text(ViewElement::MoreItems, config.labels.more_items(hidden));
            }
            None => state.set_visible(ViewElement::MoreItems, false),
        }
    }
    if placeholder {
        state.set_visible(ViewElement::NoData, !has_items);
    }
}

#[cfg(test)]
#[path = "tests/populate_tests.rs"]
mod tests;
