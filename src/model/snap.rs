use serde::{Deserialize, Serialize};

use crate::parse::SnapshotError;

/// The single latest meal-menu record pushed by the host application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub meal_type: String,
    pub meal_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    pub items: Vec<String>,
}

impl Snapshot {
    pub fn new(meal_type: impl Into<String>, meal_date: impl Into<String>) -> Self {
        Self {
            meal_type: meal_type.into(),
            meal_date: meal_date.into(),
            city_name: None,
            items: Vec::new(),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        let city = city.into();
        self.city_name = if city.is_empty() { None } else { Some(city) };
        self
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn meal_kind(&self) -> MealKind {
        MealKind::from_raw(&self.meal_type)
    }

    /// Location label, if one should be shown.
    pub fn location(&self) -> Option<&str> {
        self.city_name.as_deref().filter(|c| !c.is_empty())
    }
}

/// Display category of a meal.
///
/// Only `"BREAKFAST"` selects the breakfast label; every other raw value,
/// including unknown ones such as `"LUNCH"`, displays as dinner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MealKind {
    Breakfast,
    Dinner,
}

impl MealKind {
    pub fn from_raw(raw: &str) -> Self {
        if raw == "BREAKFAST" {
            MealKind::Breakfast
        } else {
            MealKind::Dinner
        }
    }
}

/// Outcome of reading the snapshot store.
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetData {
    Populated(Snapshot),
    NoData,
    Malformed(SnapshotError),
}

impl WidgetData {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            WidgetData::Populated(snap) => Some(snap),
            WidgetData::NoData | WidgetData::Malformed(_) => None,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        self.snapshot().is_none()
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetData::Populated(_) => "populated",
            WidgetData::NoData => "no-data",
            WidgetData::Malformed(_) => "malformed",
        }
    }
}
