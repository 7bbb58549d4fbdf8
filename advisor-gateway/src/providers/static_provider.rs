//! In-memory provider backed by a fixed table of payloads.

use std::sync::atomic::{AtomicBool, Ordering};

use advisor_core::errors::{ProviderError, ProviderResult};
use advisor_core::models::DataClass;
use advisor_core::traits::IDataProvider;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// Serves payloads from memory. Keys are matched case-insensitively.
pub struct StaticProvider {
    name: String,
    data: DashMap<(DataClass, String), Value>,
    available: AtomicBool,
}

impl StaticProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    fn normalize(key: &str) -> String {
        key.trim().to_uppercase()
    }

    pub fn with(self, class: DataClass, key: &str, value: Value) -> Self {
        self.set(class, key, value);
        self
    }

    pub fn set(&self, class: DataClass, key: &str, value: Value) {
        self.data.insert((class, Self::normalize(key)), value);
    }

    pub fn remove(&self, class: DataClass, key: &str) {
        self.data.remove(&(class, Self::normalize(key)));
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }
}

#[async_trait]
impl IDataProvider for StaticProvider {
    async fn fetch(&self, key: &str, class: DataClass) -> ProviderResult<Value> {
        self.data
            .get(&(class, Self::normalize(key)))
            .map(|v| v.value().clone())
            .ok_or_else(|| ProviderError::RequestFailed {
                provider: self.name.clone(),
                reason: format!("no {class} data for {key}"),
            })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn serves_configured_payloads() {
        let p = StaticProvider::new("static").with(DataClass::Quote, "spy", json!({"price": 500.0}));
        assert_eq!(
            p.fetch("SPY", DataClass::Quote).await.unwrap(),
            json!({"price": 500.0})
        );
        assert!(p.fetch("SPY", DataClass::News).await.is_err());
    }

    #[tokio::test]
    async fn removal_and_updates_apply() {
        let p = StaticProvider::new("static");
        p.set(DataClass::News, "fed", json!([]));
        assert!(p.fetch("fed", DataClass::News).await.is_ok());
        p.remove(DataClass::News, "FED");
        assert!(p.fetch("fed", DataClass::News).await.is_err());
    }
}
