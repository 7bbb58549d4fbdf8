use advisor_core::models::*;
use advisor_core::Intent;
use serde_json::json;

fn meta(level: Option<KnowledgeLevel>, topics: &[&str], jurisdiction: Option<&str>) -> ChunkMetadata {
    ChunkMetadata {
        document_id: "doc".into(),
        title: "Doc".into(),
        level,
        topics: topics.iter().map(|t| t.to_string()).collect(),
        jurisdiction: jurisdiction.map(str::to_string),
        url: None,
    }
}

#[test]
fn empty_filter_matches_everything() {
    let filter = SearchFilter::new();
    assert!(filter.is_empty());
    assert!(filter.matches(&meta(None, &[], None)));
}

#[test]
fn filter_requires_every_set_criterion() {
    let filter = SearchFilter::new()
        .level(KnowledgeLevel::Beginner)
        .topic("Risk")
        .jurisdiction("us");

    assert!(filter.matches(&meta(Some(KnowledgeLevel::Beginner), &["risk"], Some("US"))));
    assert!(!filter.matches(&meta(Some(KnowledgeLevel::Advanced), &["risk"], Some("US"))));
    assert!(!filter.matches(&meta(Some(KnowledgeLevel::Beginner), &["bonds"], Some("US"))));
    assert!(!filter.matches(&meta(Some(KnowledgeLevel::Beginner), &["risk"], None)));
}

#[test]
fn knowledge_level_maps_expert_to_advanced() {
    assert_eq!(KnowledgeLevel::from_label("Expert"), Some(KnowledgeLevel::Advanced));
    assert_eq!(KnowledgeLevel::from_label("beginner"), Some(KnowledgeLevel::Beginner));
    assert_eq!(KnowledgeLevel::from_label("guru"), None);
}

#[test]
fn intent_labels_round_trip() {
    for intent in Intent::ALL {
        assert_eq!(Intent::from_label(intent.as_str()), Some(intent));
    }
    assert_eq!(Intent::default(), Intent::Tutor);
    assert_eq!(Intent::COUNT, Intent::ALL.len());
}

#[test]
fn intent_indices_are_dense() {
    let mut seen = [false; Intent::COUNT];
    for intent in Intent::ALL {
        seen[intent.index()] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn quote_completeness_requires_numeric_price() {
    assert!(DataClass::Quote.is_complete(&json!({"price": 101.5})));
    assert!(!DataClass::Quote.is_complete(&json!({"price": "101.5"})));
    assert!(!DataClass::Quote.is_complete(&json!({})));
}

#[test]
fn news_and_fundamentals_completeness() {
    assert!(DataClass::News.is_complete(&json!([])));
    assert!(!DataClass::News.is_complete(&json!({"items": []})));
    assert!(DataClass::Fundamentals.is_complete(&json!({"pe": 20})));
    assert!(!DataClass::Fundamentals.is_complete(&json!({})));
}

#[test]
fn handler_output_flags_are_deduplicated() {
    let mut out = HandlerOutput::new("text", 2.0);
    assert_eq!(out.confidence, 1.0);
    out.flag(ResponseFlag::NoSources);
    out.flag(ResponseFlag::NoSources);
    assert_eq!(out.flags.len(), 1);
}

#[test]
fn degraded_output_carries_flag_and_zero_confidence() {
    let out = HandlerOutput::degraded(ResponseFlag::Timeout);
    assert!(out.has_flag(ResponseFlag::Timeout));
    assert_eq!(out.confidence, 0.0);
    assert!(!out.text.is_empty());
}

#[test]
fn request_context_history_only_grows() {
    let req = Request::new("u1", "what is risk", "c1");
    let mut ctx = RequestContext::new(req, Vec::new());
    assert!(ctx.history().is_empty());
    assert_eq!(ctx.profile.jurisdiction, "US");

    ctx.append_turn(Turn {
        seq: 1,
        query: "q".into(),
        intent: Some(Intent::Market),
        response: "r".into(),
        at: chrono::Utc::now(),
    });
    assert_eq!(ctx.history().len(), 1);
    assert_eq!(ctx.last_intent(), Some(Intent::Market));
}

#[test]
fn portfolio_total_value_is_at_cost() {
    let p = Portfolio::new(vec![Holding::new("AAPL", 10.0, 150.0), Holding::new("BND", 5.0, 70.0)]);
    assert_eq!(p.total_value(), 1850.0);
}

#[test]
fn compliance_flag_serializes_snake_case() {
    let raw = serde_json::to_string(&ComplianceFlag::PersonalizedAdvice).unwrap();
    assert_eq!(raw, "\"personalized_advice\"");
    assert!(ComplianceFlag::ReturnPromise.is_blocking());
    assert!(!ComplianceFlag::TimeSensitive.is_blocking());
}
