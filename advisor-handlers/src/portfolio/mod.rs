//! Portfolio handler: structural analysis of the holdings supplied with the
//! request, plus educational context from retrieval.

pub mod analytics;
pub mod review;

use std::sync::Arc;

use advisor_core::errors::{AdvisorError, HandlerError, HandlerResult};
use advisor_core::models::{HandlerOutput, Portfolio, ResponseFlag, SearchFilter, Source};
use advisor_core::traits::{IPortfolioAnalytics, PortfolioMetrics};
use advisor_core::Intent;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::context::DispatchContext;
use crate::format::{money, percent};
use crate::handler::IHandler;

pub use analytics::StructuralAnalytics;

pub const EMPTY_PORTFOLIO_MESSAGE: &str = "I'd be happy to analyze your portfolio! \
However, I don't see any holdings data. \
Please upload your portfolio data or add holdings manually.";

/// Topic used to pull educational context.
const CONTEXT_TOPIC: &str = "portfolio";
const CONTEXT_RESULTS: usize = 2;
const MAX_RECOMMENDATIONS: usize = 3;

pub struct PortfolioHandler {
    analytics: Arc<dyn IPortfolioAnalytics>,
}

impl PortfolioHandler {
    pub fn new(analytics: Arc<dyn IPortfolioAnalytics>) -> Self {
        Self { analytics }
    }

    /// Retrieval context is best effort: failures other than cancellation
    /// leave the analysis without further reading.
    async fn further_reading(
        &self,
        ctx: &DispatchContext,
    ) -> HandlerResult<(Vec<String>, Vec<Source>, bool)> {
        let filter = SearchFilter::new().topic(CONTEXT_TOPIC);
        let outcome = match ctx.retrieve(ctx.query(), Some(&filter), CONTEXT_RESULTS).await {
            Ok(o) => o,
            Err(HandlerError::Cancelled) => return Err(HandlerError::Cancelled),
            Err(e) => {
                warn!(error = %e, "portfolio context retrieval failed");
                return Ok((Vec::new(), Vec::new(), true));
            }
        };
        let mut lines = Vec::new();
        let mut sources = Vec::new();
        for r in &outcome.results {
            lines.push(format!(
                "- {} [Source: {}]",
                first_sentence(&r.text),
                r.attribution.title
            ));
            sources.push(Source::from_attribution(&r.attribution, r.fused_score));
        }
        Ok((lines, sources, outcome.partial))
    }
}

impl Default for PortfolioHandler {
    fn default() -> Self {
        Self::new(Arc::new(StructuralAnalytics))
    }
}

fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    match text.find(". ") {
        Some(end) => &text[..=end],
        None => text,
    }
}

fn into_handler_error(e: AdvisorError) -> HandlerError {
    match e {
        AdvisorError::Handler(h) => h,
        other => HandlerError::Internal {
            reason: other.to_string(),
        },
    }
}

fn render(portfolio: &Portfolio, metrics: &PortfolioMetrics, review: &review::Review) -> String {
    let total = metrics
        .get(analytics::TOTAL_VALUE)
        .unwrap_or_else(|| portfolio.total_value());
    let mut lines = vec![
        "## Portfolio Analysis Summary".to_string(),
        format!(
            "Your portfolio has {} holdings with a total value of {}.",
            portfolio.holdings.len(),
            money(total)
        ),
        String::new(),
        "**Key Metrics:**".to_string(),
    ];
    if let Some(hhi) = metrics.get(analytics::HERFINDAHL) {
        lines.push(format!("- Herfindahl Index: {hhi:.3}"));
    }
    if let Some(ratio) = metrics.get(analytics::DIVERSIFICATION_RATIO) {
        lines.push(format!("- Effective Number of Holdings: {ratio:.1}"));
    }
    if let Some((symbol, weight)) = &review.largest {
        lines.push(format!("- Largest Position: {symbol} ({})", percent(*weight)));
    }

    if !review.strengths.is_empty() {
        lines.push(String::new());
        lines.push("**Strengths:**".to_string());
        lines.extend(review.strengths.iter().map(|s| format!("- {s}")));
    }
    if !review.concerns.is_empty() {
        lines.push(String::new());
        lines.push("**Areas for Improvement:**".to_string());
        lines.extend(review.concerns.iter().map(|c| format!("- {c}")));
    }
    if !review.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("**Top Recommendations:**".to_string());
        for (i, rec) in review.recommendations.iter().take(MAX_RECOMMENDATIONS).enumerate() {
            lines.push(format!("{}. **{}**: {}", i + 1, rec.title, rec.description));
        }
    }
    lines.join("\n")
}

#[async_trait]
impl IHandler for PortfolioHandler {
    fn intent(&self) -> Intent {
        Intent::Portfolio
    }

    fn name(&self) -> &str {
        "portfolio"
    }

    async fn handle(&self, ctx: &DispatchContext) -> HandlerResult<HandlerOutput> {
        ctx.ensure_active()?;
        let portfolio = match &ctx.request.portfolio {
            Some(p) if !p.is_empty() => p,
            _ => {
                debug!("no holdings supplied");
                return Ok(HandlerOutput::new(EMPTY_PORTFOLIO_MESSAGE, 0.3).with_payload(json!({
                    "recommendations": [],
                    "metrics": {},
                })));
            }
        };

        let metrics = self.analytics.metrics(portfolio).map_err(into_handler_error)?;
        let positions: Vec<(String, f64)> = portfolio
            .holdings
            .iter()
            .map(|h| h.symbol.clone())
            .zip(analytics::weights(portfolio))
            .collect();
        let review = review::review(&positions);

        let (reading, sources, partial) = self.further_reading(ctx).await?;
        let mut text = render(portfolio, &metrics, &review);
        if !reading.is_empty() {
            text.push_str("\n\n**Further Reading:**\n");
            text.push_str(&reading.join("\n"));
        }

        let mut out = HandlerOutput::new(text, 0.9)
            .with_sources(sources)
            .with_payload(json!({
                "analytics": self.analytics.name(),
                "metrics": metrics.values,
                "weights": positions,
                "strengths": review.strengths,
                "concerns": review.concerns,
                "recommendations": review.recommendations,
            }));
        if partial {
            out.flag(ResponseFlag::PartialRetrieval);
        }
        Ok(out)
    }
}
