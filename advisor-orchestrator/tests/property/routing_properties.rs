use advisor_core::Intent;
use advisor_orchestrator::IntentClassifier;
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("explain".to_string()),
        Just("what is".to_string()),
        Just("portfolio".to_string()),
        Just("risk".to_string()),
        Just("market".to_string()),
        Just("news".to_string()),
        Just("AAPL".to_string()),
        Just("volatility".to_string()),
        "[a-z]{1,8}",
    ]
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..16).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn below_threshold_always_routes_default(q in query(), t in 0.0f64..=1.0) {
        let c = IntentClassifier::new(t).classify(&q, &[]);
        prop_assert!((0.0..=1.0).contains(&c.confidence));
        if c.confidence < t {
            prop_assert_eq!(c.intent, Intent::DEFAULT);
            prop_assert!(c.is_fallback());
        }
    }

    #[test]
    fn routing_is_deterministic(q in query()) {
        let classifier = IntentClassifier::default();
        prop_assert_eq!(classifier.classify(&q, &[]), classifier.classify(&q, &[]));
    }

    #[test]
    fn non_fallback_winner_has_the_top_score(q in query()) {
        let c = IntentClassifier::default().classify(&q, &[]);
        if !c.is_fallback() {
            let best = c.scores.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(c.scores[c.intent.index()], best);
            prop_assert!(best > 0);
        }
    }
}
