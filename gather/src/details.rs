//! Storefront `appdetails` document -> `StoreRecord`.

use serde_json::Value;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Storefront release dates look like `Jul 9, 2013`.
const RELEASE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Normalized app details, ready for the three catalog tables.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub app_id: u32,
    pub name: String,
    pub coming_soon: bool,
    pub release_date: Option<Date>,
    pub is_free: bool,
    pub recommendations: i64,
    /// The untouched `data` object.
    pub raw_json: Value,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
}

impl StoreRecord {
    /// Extract a record from an `appdetails` response body.
    ///
    /// Returns `None` unless the body reports `success: true` for `app_id`.
    #[must_use]
    pub fn from_response(app_id: u32, body: &Value) -> Option<Self> {
        let entry = body.get(app_id.to_string())?;
        if !entry.get("success").and_then(Value::as_bool).unwrap_or(false) {
            return None;
        }

        let data = entry.get("data").cloned().unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let release = data.get("release_date");

        Some(Self {
            app_id,
            name: data.get("name").and_then(Value::as_str).unwrap_or_default().to_owned(),
            coming_soon: release
                .and_then(|r| r.get("coming_soon"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            release_date: release
                .and_then(|r| r.get("date"))
                .and_then(Value::as_str)
                .and_then(parse_release_date),
            is_free: data.get("is_free").and_then(Value::as_bool).unwrap_or(false),
            recommendations: data
                .get("recommendations")
                .and_then(|r| r.get("total"))
                .and_then(Value::as_i64)
                .unwrap_or(0),
            categories: descriptions(&data, "categories"),
            genres: descriptions(&data, "genres"),
            raw_json: data,
        })
    }
}

/// Parse a storefront release date; anything unexpected yields `None`.
#[must_use]
pub fn parse_release_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Date::parse(raw, RELEASE_DATE_FORMAT).ok()
}

fn descriptions(data: &Value, key: &str) -> Vec<String> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("description").and_then(Value::as_str))
                .filter(|desc| !desc.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "details_test.rs"]
mod tests;
