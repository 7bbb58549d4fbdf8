mod compliance;
mod data_provider;
mod embedding;
mod portfolio_analytics;

pub use compliance::IComplianceReviewer;
pub use data_provider::IDataProvider;
pub use embedding::IEmbeddingProvider;
pub use portfolio_analytics::{IPortfolioAnalytics, PortfolioMetrics};
