//! Market handler: quotes and news through the data gateway, summarized
//! with a simple sentiment read.
//!
//! Missing data never fails the handler. Stale values are used and flagged;
//! unavailable ones are named in the text and flagged.

pub mod quote;
pub mod sentiment;
pub mod symbols;

use advisor_core::errors::HandlerResult;
use advisor_core::models::{DataClass, Fetched, HandlerOutput, ResponseFlag, Source};
use advisor_core::Intent;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::context::DispatchContext;
use crate::format::{grouped, money};
use crate::handler::IHandler;

use quote::{parse_news, NewsItem, Quote};
use sentiment::Sentiment;

/// News key used when the query names no symbol.
pub const GENERAL_NEWS_KEY: &str = "general";
const MAX_NEWS: usize = 3;

/// Symbols to quote and the news key for a query.
pub fn plan(query: &str) -> (Vec<String>, String, bool) {
    let named = symbols::extract_symbols(query);
    if named.is_empty() {
        let defaults = symbols::DEFAULT_INDICES.iter().map(|s| s.to_string()).collect();
        return (defaults, GENERAL_NEWS_KEY.to_string(), true);
    }
    let mut sorted: Vec<&str> = named.clone();
    sorted.sort_unstable();
    let news_key = sorted.join(",");
    (named.into_iter().map(String::from).collect(), news_key, false)
}

struct QuoteLine<'a> {
    symbol: &'a str,
    fetched: &'a Fetched,
    quote: Option<Quote>,
}

impl QuoteLine<'_> {
    fn display_name(&self) -> String {
        let name = self
            .quote
            .as_ref()
            .and_then(|q| q.name.clone())
            .or_else(|| symbols::index_name(self.symbol).map(String::from));
        match name {
            Some(n) => format!("{n} ({})", self.symbol),
            None => self.symbol.to_string(),
        }
    }
}

pub struct MarketHandler;

impl MarketHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarketHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn sources_of(fetched: &[&Fetched]) -> Vec<Source> {
    let mut providers: Vec<&str> = fetched
        .iter()
        .filter(|f| !f.is_unavailable())
        .filter_map(|f| f.provider.as_deref())
        .collect();
    providers.sort_unstable();
    providers.dedup();
    providers
        .into_iter()
        .map(|p| Source::named(format!("Market data: {p}")))
        .collect()
}

fn render(
    lines: &[QuoteLine<'_>],
    defaults: bool,
    insights: &[String],
    news: &[NewsItem],
    sentiment: Sentiment,
    stale: bool,
) -> String {
    let mut out = vec!["## Market Intelligence Update".to_string()];

    if !insights.is_empty() {
        out.push(String::new());
        out.push("**Key Insights:**".to_string());
        out.extend(insights.iter().map(|i| format!("- {i}")));
    }

    match lines {
        [single] => {
            out.push(String::new());
            out.push(format!("**{} Quote:**", single.symbol));
            match &single.quote {
                Some(q) => {
                    out.push(format!("- Price: {}", money(q.price)));
                    out.push(format!("- Change: {:+.2} ({:+.2}%)", q.change, q.change_percent));
                    if let Some(volume) = q.volume {
                        out.push(format!("- Volume: {}", grouped(volume)));
                    }
                }
                None => out.push("- Data currently unavailable".to_string()),
            }
        }
        _ => {
            out.push(String::new());
            out.push(if defaults { "**Market Indices:**" } else { "**Quotes:**" }.to_string());
            for line in lines {
                match &line.quote {
                    Some(q) => out.push(format!(
                        "- {}: {:.2} ({:+.2}%)",
                        line.display_name(),
                        q.price,
                        q.change_percent
                    )),
                    None => out.push(format!(
                        "- {}: data currently unavailable",
                        line.display_name()
                    )),
                }
            }
        }
    }

    if !news.is_empty() {
        out.push(String::new());
        out.push("**Relevant News:**".to_string());
        for item in news.iter().take(MAX_NEWS) {
            match &item.source {
                Some(source) => out.push(format!("- {} ({source})", item.title)),
                None => out.push(format!("- {}", item.title)),
            }
        }
    }

    out.push(String::new());
    out.push(format!("**Market Sentiment:** {}", sentiment.label()));

    if stale {
        out.push(String::new());
        out.push("Note: some figures come from cache and may be delayed.".to_string());
    }
    out.join("\n")
}

#[async_trait]
impl IHandler for MarketHandler {
    fn intent(&self) -> Intent {
        Intent::Market
    }

    fn name(&self) -> &str {
        "market"
    }

    async fn handle(&self, ctx: &DispatchContext) -> HandlerResult<HandlerOutput> {
        ctx.ensure_active()?;
        let (keys, news_key, defaults) = plan(ctx.query());
        debug!(symbols = ?keys, news_key = %news_key, "market plan");

        let (quotes, news) = tokio::join!(
            ctx.gateway
                .fetch_many_with_cancel(&keys, DataClass::Quote, &ctx.cancel),
            ctx.gateway
                .fetch_with_cancel(&news_key, DataClass::News, &ctx.cancel),
        );
        ctx.ensure_active()?;

        let lines: Vec<QuoteLine<'_>> = keys
            .iter()
            .zip(&quotes)
            .map(|(symbol, fetched)| QuoteLine {
                symbol,
                fetched,
                quote: fetched.value.as_ref().and_then(Quote::parse),
            })
            .collect();
        let news_items = news.value.as_ref().map(parse_news).unwrap_or_default();

        let available: Vec<&QuoteLine<'_>> = lines.iter().filter(|l| l.quote.is_some()).collect();
        let mut insights = Vec::new();
        let tone = match available.as_slice() {
            [] => None,
            [only] if lines.len() == 1 => {
                let q = only.quote.as_ref().map(|q| q.change_percent).unwrap_or(0.0);
                Some(sentiment::single(only.symbol, q))
            }
            many => {
                let changes: Vec<f64> = many
                    .iter()
                    .filter_map(|l| l.quote.as_ref().map(|q| q.change_percent))
                    .collect();
                sentiment::breadth(&changes)
            }
        };
        let sentiment = match tone {
            Some((s, insight)) => {
                insights.push(insight);
                s
            }
            None => {
                insights.push("Live market data is currently unavailable".to_string());
                Sentiment::Neutral
            }
        };

        let all_fetched: Vec<&Fetched> = quotes.iter().chain(std::iter::once(&news)).collect();
        let stale = all_fetched.iter().any(|f| f.is_stale());
        let unavailable = lines.iter().any(|l| l.quote.is_none()) || news.is_unavailable();

        let text = render(&lines, defaults, &insights, &news_items, sentiment, stale);
        let confidence = 0.9 * available.len() as f64 / lines.len().max(1) as f64;

        let mut quote_payload = Map::new();
        for line in &lines {
            quote_payload.insert(
                line.symbol.to_string(),
                json!({
                    "freshness": line.fetched.freshness,
                    "provider": line.fetched.provider,
                    "quote": line.quote,
                }),
            );
        }

        let mut out = HandlerOutput::new(text, confidence.max(0.1))
            .with_sources(sources_of(&all_fetched))
            .with_payload(json!({
                "symbols": keys,
                "sentiment": sentiment,
                "quotes": Value::Object(quote_payload),
                "news": news_items,
                "news_freshness": news.freshness,
            }));
        if stale {
            out.flag(ResponseFlag::DataStale);
        }
        if unavailable {
            out.flag(ResponseFlag::DataUnavailable);
        }
        Ok(out)
    }
}
