use advisor_compliance::footer;
use advisor_compliance::ComplianceGate;
use advisor_core::traits::IComplianceReviewer;
use advisor_core::Intent;
use proptest::prelude::*;

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("you should".to_string()),
        Just("You must".to_string()),
        Just("I recommend you".to_string()),
        Just("guaranteed returns".to_string()),
        Just("a sure thing".to_string()),
        Just("we promise 9%".to_string()),
        Just("buy bonds".to_string()),
        Just("act now".to_string()),
        Just("[Source: Bond Basics]".to_string()),
        Just("[2]".to_string()),
        Just("diversify".to_string()),
        Just(".".to_string()),
        "[a-z]{1,8}",
    ]
}

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..12).prop_map(|parts| parts.join(" "))
}

fn intent() -> impl Strategy<Value = Option<Intent>> {
    prop_oneof![
        Just(None),
        Just(Some(Intent::Tutor)),
        Just(Some(Intent::Portfolio)),
        Just(Some(Intent::Market)),
    ]
}

// ── Review is a fixpoint ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn review_twice_equals_review_once(
        input in text(),
        intent in intent(),
        jurisdiction in prop_oneof![Just("US"), Just("UK"), Just("ZZ")],
    ) {
        let gate = ComplianceGate::default();
        let once = gate.review(&input, jurisdiction, intent);
        let twice = gate.review(&once.text, jurisdiction, intent);
        prop_assert_eq!(&once.text, &twice.text);
        prop_assert!(twice.modifications.is_empty());
    }
}

// ── Source markers survive ────────────────────────────────────────────────

proptest! {
    #[test]
    fn source_markers_are_never_removed(
        before in text(),
        title in "[A-Za-z ]{1,20}",
        after in text(),
    ) {
        let marker = format!("[Source: {title}]");
        let input = format!("{before} {marker} {after}");
        let gate = ComplianceGate::default();
        let verdict = gate.review_text(&input, "US");
        prop_assert!(verdict.text.contains(&marker), "lost {} in {}", marker, verdict.text);
    }
}

// ── Blocking content never survives in the body ───────────────────────────

proptest! {
    #[test]
    fn blocking_phrases_never_reach_the_body(input in text()) {
        let gate = ComplianceGate::default();
        let verdict = gate.review_text(&input, "US");
        let body = footer::split(&verdict.text).0.to_lowercase();
        prop_assert!(!body.contains("sure thing"));
        prop_assert!(!body.contains("guaranteed returns"));
        prop_assert!(!body.contains("promise 9%"));
    }
}
