//! Strengths, concerns, and recommendations derived from weights.

use serde::Serialize;

use crate::format::percent;

/// A single position above this weight is a concentration concern.
pub const CONCENTRATION_LIMIT: f64 = 0.3;
pub const MIN_HOLDINGS: usize = 5;
pub const MAX_HOLDINGS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: &'static str,
    pub priority: Priority,
    pub title: &'static str,
    pub description: String,
    pub action: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Review {
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    /// Symbol and weight of the largest position.
    pub largest: Option<(String, f64)>,
}

/// Review holdings given `(symbol, weight)` pairs in input order.
pub fn review(positions: &[(String, f64)]) -> Review {
    let mut out = Review::default();

    // First maximum wins so ties report the earlier holding.
    let largest = positions.iter().fold(None::<&(String, f64)>, |best, p| match best {
        Some(b) if b.1 >= p.1 => Some(b),
        _ => Some(p),
    });
    out.largest = largest.cloned();

    let concentrated = match largest {
        Some((symbol, weight)) if *weight > CONCENTRATION_LIMIT => {
            out.concerns
                .push(format!("High concentration in {symbol} ({})", percent(*weight)));
            Some(symbol.clone())
        }
        Some(_) => {
            out.strengths.push("Good diversification across holdings".to_string());
            None
        }
        None => None,
    };

    let count = positions.len();
    if count < MIN_HOLDINGS {
        out.concerns
            .push("Portfolio has fewer than 5 holdings - consider diversification".to_string());
    } else if count > MAX_HOLDINGS {
        out.concerns
            .push("Portfolio may be over-diversified - consider consolidation".to_string());
    } else {
        out.strengths
            .push("Appropriate number of holdings for diversification".to_string());
    }

    if let Some(symbol) = concentrated {
        out.recommendations.push(Recommendation {
            kind: "concentration",
            priority: Priority::High,
            title: "Reduce Concentration",
            description: format!("A large share of the portfolio sits in {symbol}"),
            action: "Consider trimming the largest position toward your target weight",
        });
    }
    if count < MIN_HOLDINGS {
        out.recommendations.push(Recommendation {
            kind: "diversification",
            priority: Priority::High,
            title: "Improve Diversification",
            description: "Consider adding more holdings to improve diversification".to_string(),
            action: "Add 3-5 additional holdings across different sectors",
        });
    } else if count > MAX_HOLDINGS {
        out.recommendations.push(Recommendation {
            kind: "consolidation",
            priority: Priority::Low,
            title: "Consolidate Holdings",
            description: "Many small positions add tracking effort without much diversification"
                .to_string(),
            action: "Merge overlapping positions into broader funds",
        });
    }
    if count > 1 {
        out.recommendations.push(Recommendation {
            kind: "rebalancing",
            priority: Priority::Medium,
            title: "Regular Rebalancing",
            description: "Consider rebalancing quarterly to maintain target allocation".to_string(),
            action: "Set up quarterly rebalancing schedule",
        });
    }
    out.recommendations.sort_by_key(|r| r.priority);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(weights: &[f64]) -> Vec<(String, f64)> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("S{i}"), *w))
            .collect()
    }

    #[test]
    fn concentrated_small_portfolio() {
        let r = review(&positions(&[0.6, 0.3, 0.1]));
        assert_eq!(r.concerns.len(), 2);
        assert_eq!(r.concerns[0], "High concentration in S0 (60.0%)");
        assert!(r.strengths.is_empty());
        let kinds: Vec<&str> = r.recommendations.iter().map(|x| x.kind).collect();
        assert_eq!(kinds, vec!["concentration", "diversification", "rebalancing"]);
    }

    #[test]
    fn balanced_portfolio_has_only_strengths() {
        let r = review(&positions(&[0.2; 5]));
        assert!(r.concerns.is_empty());
        assert_eq!(r.strengths.len(), 2);
        assert_eq!(r.recommendations.len(), 1);
        assert_eq!(r.recommendations[0].kind, "rebalancing");
    }

    #[test]
    fn over_diversified() {
        let r = review(&positions(&[1.0 / 25.0; 25]));
        assert!(r.concerns[0].contains("over-diversified"));
        assert_eq!(r.recommendations.last().unwrap().priority, Priority::Low);
    }

    #[test]
    fn exactly_thirty_percent_is_not_concentrated() {
        let r = review(&positions(&[0.3, 0.2, 0.2, 0.2, 0.1]));
        assert!(r.concerns.is_empty());
    }

    #[test]
    fn single_holding_gets_no_rebalancing() {
        let r = review(&positions(&[1.0]));
        assert!(r.recommendations.iter().all(|x| x.kind != "rebalancing"));
        assert_eq!(r.largest, Some(("S0".to_string(), 1.0)));
    }
}
