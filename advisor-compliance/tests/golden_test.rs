//! Golden compliance samples: each case lists the categories that must be
//! raised and the phrases that must not survive review.

use advisor_compliance::ComplianceGate;
use advisor_core::traits::IComplianceReviewer;
use test_fixtures::compliance_cases;

#[test]
fn golden_flags_match_exactly() {
    let gate = ComplianceGate::default();
    for case in compliance_cases() {
        let verdict = gate.review(&case.input, &case.jurisdiction, None);
        let mut got: Vec<&str> = verdict.flags.iter().map(|f| f.as_str()).collect();
        got.sort();
        let mut want: Vec<&str> = case.expect_flags.iter().map(String::as_str).collect();
        want.sort();
        assert_eq!(got, want, "case '{}': flag mismatch", case.name);
    }
}

#[test]
fn golden_phrases_do_not_survive() {
    let gate = ComplianceGate::default();
    for case in compliance_cases() {
        let verdict = gate.review(&case.input, &case.jurisdiction, None);
        for phrase in &case.must_not_contain {
            assert!(
                !verdict.text.contains(phrase.as_str()),
                "case '{}': '{}' survived in: {}",
                case.name,
                phrase,
                verdict.text
            );
        }
    }
}

#[test]
fn golden_approval_matches() {
    let gate = ComplianceGate::default();
    for case in compliance_cases() {
        let verdict = gate.review(&case.input, &case.jurisdiction, None);
        assert_eq!(
            verdict.approved, case.approved,
            "case '{}': approval mismatch",
            case.name
        );
    }
}

#[test]
fn golden_review_is_a_fixpoint() {
    let gate = ComplianceGate::default();
    for case in compliance_cases() {
        let once = gate.review(&case.input, &case.jurisdiction, None);
        let twice = gate.review(&once.text, &case.jurisdiction, None);
        assert_eq!(once.text, twice.text, "case '{}': not idempotent", case.name);
        assert!(
            twice.modifications.is_empty(),
            "case '{}': second pass rewrote {:?}",
            case.name,
            twice.modifications
        );
    }
}

#[test]
fn golden_source_markers_are_kept() {
    let gate = ComplianceGate::default();
    for case in compliance_cases() {
        let verdict = gate.review(&case.input, &case.jurisdiction, None);
        let mut rest = case.input.as_str();
        while let Some(start) = rest.find("[Source:") {
            let end = rest[start..].find(']').map(|e| start + e + 1).unwrap();
            let marker = &rest[start..end];
            assert!(
                verdict.text.contains(marker),
                "case '{}': lost {}",
                case.name,
                marker
            );
            rest = &rest[end..];
        }
    }
}
