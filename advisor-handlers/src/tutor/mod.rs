//! Tutor handler: explains concepts from the indexed educational corpus at
//! the user's knowledge level.

pub mod pedagogy;

use advisor_core::errors::HandlerResult;
use advisor_core::models::{HandlerOutput, ResponseFlag, RetrievalResult, SearchFilter, Source};
use advisor_core::Intent;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::context::DispatchContext;
use crate::handler::IHandler;

/// Retrieved chunks quoted in one answer.
const MAX_SECTIONS: usize = 2;

pub struct TutorHandler {
    max_sections: usize,
}

impl TutorHandler {
    pub fn new() -> Self {
        Self {
            max_sections: MAX_SECTIONS,
        }
    }

    fn no_content(&self) -> HandlerOutput {
        let mut out = HandlerOutput::new(pedagogy::NO_CONTENT_MESSAGE, 0.2).with_payload(json!({
            "follow_up_questions": pedagogy::CLARIFYING_QUESTIONS,
            "concepts_covered": [],
            "learning_objectives": [],
        }));
        out.flag(ResponseFlag::NoSources);
        out
    }
}

impl Default for TutorHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// `text [Source: title]` for each chunk, one paragraph per chunk.
fn cited_sections(results: &[RetrievalResult]) -> String {
    results
        .iter()
        .map(|r| format!("{} [Source: {}]", r.text.trim(), r.attribution.title))
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// One source per document, keeping each document's best score.
fn sources_of(results: &[RetrievalResult]) -> Vec<Source> {
    let mut sources: Vec<Source> = Vec::new();
    for r in results {
        if sources
            .iter()
            .any(|s| s.document_id.as_deref() == Some(r.attribution.document_id.as_str()))
        {
            continue;
        }
        sources.push(Source::from_attribution(&r.attribution, r.fused_score));
    }
    sources
}

#[async_trait]
impl IHandler for TutorHandler {
    fn intent(&self) -> Intent {
        Intent::Tutor
    }

    fn name(&self) -> &str {
        "tutor"
    }

    async fn handle(&self, ctx: &DispatchContext) -> HandlerResult<HandlerOutput> {
        ctx.ensure_active()?;
        let level = ctx.request.profile.knowledge_level;
        let query = ctx.query();

        let filter = SearchFilter::new().level(level);
        let mut outcome = ctx.retrieve(query, Some(&filter), ctx.k).await?;
        let mut level_matched = true;
        if outcome.results.is_empty() {
            debug!(level = level.as_str(), "no content at level, retrying unfiltered");
            outcome = ctx.retrieve(query, None, ctx.k).await?;
            level_matched = false;
        }

        if outcome.results.is_empty() {
            let mut out = self.no_content();
            if outcome.partial {
                out.flag(ResponseFlag::PartialRetrieval);
            }
            return Ok(out);
        }

        let best: Vec<RetrievalResult> = outcome
            .results
            .iter()
            .take(self.max_sections)
            .cloned()
            .collect();
        let body: String = best.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join(" ");
        let concepts = pedagogy::concepts(&body);
        let objectives = pedagogy::learning_objectives(&concepts);
        let follow_ups = pedagogy::follow_ups(query, level);

        let text = format!(
            "{}\n\n{}",
            pedagogy::opener(query, level),
            cited_sections(&best)
        );
        let confidence = best.first().map(|r| r.fused_score).unwrap_or(0.0);

        let mut out = HandlerOutput::new(text, confidence)
            .with_sources(sources_of(&best))
            .with_payload(json!({
                "difficulty_level": level.as_str(),
                "level_matched": level_matched,
                "follow_up_questions": follow_ups,
                "concepts_covered": concepts,
                "learning_objectives": objectives,
            }));
        if outcome.partial {
            out.flag(ResponseFlag::PartialRetrieval);
        }
        Ok(out)
    }
}
