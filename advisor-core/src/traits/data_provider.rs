use async_trait::async_trait;

use crate::errors::ProviderResult;
use crate::models::DataClass;

/// Upstream source of volatile market data.
///
/// Implementations perform one attempt per call; retries, fallback, and
/// caching belong to the gateway.
#[async_trait]
pub trait IDataProvider: Send + Sync {
    /// Fetch the raw payload for `key` (e.g. a ticker) of the given class.
    async fn fetch(&self, key: &str, class: DataClass) -> ProviderResult<serde_json::Value>;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool {
        true
    }
}
