use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{Dimensions, WidgetId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub version: u32,

    #[serde(default)]
    pub labels: Labels,

    #[serde(default)]
    pub date_locale: DateLocale,

    #[serde(default)]
    pub theme: Theme,

    /// Host application entry point opened when the widget is tapped.
    #[serde(default)]
    pub launch_target: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            version: 1,
            labels: Labels::default(),
            date_locale: DateLocale::default(),
            theme: Theme::default(),
            launch_target: Some("kykyemek://home".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub widget_name: String,
    pub no_data: String,
    pub breakfast: String,
    pub dinner: String,
    /// `{count}` is replaced with the number of hidden items.
    pub more_items: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            widget_name: "KYK Yemek".to_string(),
            no_data: "Veri yok".to_string(),
            breakfast: "Kahvaltı".to_string(),
            dinner: "Akşam Yemeği".to_string(),
            more_items: "+{count} daha".to_string(),
        }
    }
}

impl Labels {
    pub fn more_items(&self, count: usize) -> String {
        self.more_items.replace("{count}", &count.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    #[default]
    Tr,
    En,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "#1e1e2e".to_string(),
            text_color: "#f5f5f5".to_string(),
            accent_color: "#f9a825".to_string(),
        }
    }
}

/// Placed widget instances, as the hosting platform's widget manager knows them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRegistry {
    pub version: u32,

    #[serde(default)]
    pub instances: BTreeMap<WidgetId, InstanceRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub dimensions: Dimensions,

    /// Set once the configuration screen has been confirmed for this instance.
    #[serde(default)]
    pub configured_at: Option<String>,
}
