use serde::{Deserialize, Serialize};

/// One position in a user's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    /// Per-unit cost basis.
    pub cost_basis: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: f64, cost_basis: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            cost_basis,
        }
    }

    /// Position value at cost.
    pub fn value(&self) -> f64 {
        self.quantity * self.cost_basis
    }
}

/// A user's holdings, supplied with the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of position values at cost.
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(Holding::value).sum()
    }
}
