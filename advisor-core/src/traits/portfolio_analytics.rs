use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AdvisorResult;
use crate::models::Portfolio;

/// Named numeric metrics for a portfolio (e.g. `total_value`, `herfindahl`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub values: BTreeMap<String, f64>,
}

impl PortfolioMetrics {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }
}

/// Quantitative portfolio metrics. Formulas live with the implementation.
pub trait IPortfolioAnalytics: Send + Sync {
    fn metrics(&self, portfolio: &Portfolio) -> AdvisorResult<PortfolioMetrics>;

    fn name(&self) -> &str;
}
