//! Typed views over provider payloads.

use serde::{Deserialize, Serialize};

/// A quote payload. Only `price` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Quote {
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

/// News items from an array payload. Malformed entries are skipped.
pub fn parse_news(value: &serde_json::Value) -> Vec<NewsItem> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_defaults_optional_fields() {
        let q = Quote::parse(&json!({ "price": 10.5 })).unwrap();
        assert_eq!(q.change_percent, 0.0);
        assert!(q.volume.is_none());
        assert!(Quote::parse(&json!({ "last": 10.5 })).is_none());
    }

    #[test]
    fn news_skips_malformed_items() {
        let news = parse_news(&json!([{ "title": "Fed holds" }, { "headline": "x" }]));
        assert_eq!(news.len(), 1);
        assert!(parse_news(&json!({ "title": "not a list" })).is_empty());
    }
}
