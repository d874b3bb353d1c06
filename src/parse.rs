use serde_json::Value;
use thiserror::Error;
use time::Date;
use time::macros::format_description;

use crate::model::{DateLocale, Snapshot, WidgetData};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot is empty")]
    Empty,
    #[error("snapshot is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("snapshot is not a JSON object")]
    NotAnObject,
    #[error("snapshot is missing `{0}`")]
    MissingField(&'static str),
    #[error("snapshot field `{0}` has the wrong type")]
    WrongType(&'static str),
}

/// Decodes the raw stored snapshot.
///
/// `None` means the store has never been written. Anything that cannot be
/// decoded into a [`Snapshot`] is reported as [`WidgetData::Malformed`]; the
/// caller renders both cases as the empty state.
pub fn parse_snapshot(raw: Option<&str>) -> WidgetData {
    let Some(raw) = raw else {
        return WidgetData::NoData;
    };
    match decode(raw) {
        Ok(snap) => WidgetData::Populated(snap),
        Err(err) => {
            tracing::warn!(error = %err, "malformed widget snapshot");
            WidgetData::Malformed(err)
        }
    }
}

fn decode(raw: &str) -> Result<Snapshot, SnapshotError> {
    if raw.trim().is_empty() {
        return Err(SnapshotError::Empty);
    }
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SnapshotError::InvalidJson(e.to_string()))?;
    let obj = value.as_object().ok_or(SnapshotError::NotAnObject)?;

    let meal_type = required_str(obj, "mealType")?;
    let meal_date = required_str(obj, "mealDate")?;

    let city_name = match obj.get("cityName") {
        None | Some(Value::Null) => None,
        Some(value @ (Value::Array(_) | Value::Object(_))) => {
            tracing::warn!(city = %value, "ignoring non-text cityName");
            None
        }
        Some(value) => item_text(value).filter(|s| !s.is_empty()),
    };

    let items = match obj.get("items") {
        None | Some(Value::Null) => return Err(SnapshotError::MissingField("items")),
        Some(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
        Some(_) => return Err(SnapshotError::WrongType("items")),
    };

    Ok(Snapshot {
        meal_type,
        meal_date,
        city_name,
        items,
    })
}

fn required_str(
    obj: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<String, SnapshotError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(SnapshotError::MissingField(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SnapshotError::WrongType(key)),
    }
}

// Non-string values are shown as their compact JSON text; nulls are dropped.
fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

const TR_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats a `YYYY-MM-DD` date as a long date (`15 Mart 2024`).
///
/// Returns `raw` unchanged when it does not parse.
pub fn format_meal_date(raw: &str, locale: DateLocale) -> String {
    let fmt = format_description!("[year]-[month]-[day]");
    let date = match Date::parse(raw, &fmt) {
        Ok(d) => d,
        Err(err) => {
            tracing::warn!(date = raw, error = %err, "unparseable meal date");
            return raw.to_string();
        }
    };
    let months = match locale {
        DateLocale::Tr => &TR_MONTHS,
        DateLocale::En => &EN_MONTHS,
    };
    let month = months[usize::from(u8::from(date.month())) - 1];
    format!("{:02} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
#[path = "tests/parse_tests.rs"]
mod tests;
