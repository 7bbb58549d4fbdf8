//! Structural portfolio metrics computed from holdings alone.
//!
//! Weights are by value at cost. The Herfindahl index is the sum of squared
//! weights; its reciprocal is the effective number of holdings.

use advisor_core::errors::{AdvisorResult, HandlerError};
use advisor_core::models::Portfolio;
use advisor_core::traits::{IPortfolioAnalytics, PortfolioMetrics};

pub const TOTAL_VALUE: &str = "total_value";
pub const NUM_HOLDINGS: &str = "num_holdings";
pub const HERFINDAHL: &str = "herfindahl";
pub const DIVERSIFICATION_RATIO: &str = "diversification_ratio";
pub const MAX_WEIGHT: &str = "max_weight";

/// Weight of each holding, in input order. Empty when the total is not
/// positive.
pub fn weights(portfolio: &Portfolio) -> Vec<f64> {
    let total = portfolio.total_value();
    if total <= 0.0 || !total.is_finite() {
        return Vec::new();
    }
    portfolio.holdings.iter().map(|h| h.value() / total).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralAnalytics;

impl IPortfolioAnalytics for StructuralAnalytics {
    fn metrics(&self, portfolio: &Portfolio) -> AdvisorResult<PortfolioMetrics> {
        if portfolio
            .holdings
            .iter()
            .any(|h| !h.value().is_finite() || h.quantity < 0.0 || h.cost_basis < 0.0)
        {
            return Err(HandlerError::MissingInput {
                field: "holdings (non-negative quantity and cost basis)".to_string(),
            }
            .into());
        }

        let w = weights(portfolio);
        if w.is_empty() {
            return Err(HandlerError::MissingInput {
                field: "holdings with positive value".to_string(),
            }
            .into());
        }

        let hhi: f64 = w.iter().map(|x| x * x).sum();
        let max_weight = w.iter().copied().fold(0.0, f64::max);

        let mut metrics = PortfolioMetrics::default();
        metrics.set(TOTAL_VALUE, portfolio.total_value());
        metrics.set(NUM_HOLDINGS, portfolio.holdings.len() as f64);
        metrics.set(HERFINDAHL, hhi);
        metrics.set(DIVERSIFICATION_RATIO, if hhi > 0.0 { 1.0 / hhi } else { 0.0 });
        metrics.set(MAX_WEIGHT, max_weight);
        Ok(metrics)
    }

    fn name(&self) -> &str {
        "structural"
    }
}
