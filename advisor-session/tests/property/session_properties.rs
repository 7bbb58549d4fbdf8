use advisor_core::config::SessionConfig;
use advisor_session::ConversationLog;
use proptest::prelude::*;

// ── Log never exceeds its bound ───────────────────────────────────────────

proptest! {
    #[test]
    fn history_never_exceeds_max_turns(max_turns in 1usize..20, appends in 0usize..60) {
        let log = ConversationLog::new(SessionConfig { max_turns, ..Default::default() });
        for i in 0..appends {
            log.append("c", &format!("q{i}"), None, "r");
            prop_assert!(log.history("c").len() <= max_turns);
        }
        let retained = log.history("c").len() as u64;
        prop_assert_eq!(retained + log.evicted_turns("c"), appends as u64);
    }
}

// ── Sequence numbers strictly increase ────────────────────────────────────

proptest! {
    #[test]
    fn retained_seqs_are_contiguous_and_increasing(max_turns in 1usize..10, appends in 1usize..40) {
        let log = ConversationLog::new(SessionConfig { max_turns, ..Default::default() });
        for i in 0..appends {
            log.append("c", &format!("q{i}"), None, "r");
        }
        let seqs: Vec<u64> = log.history("c").iter().map(|t| t.seq).collect();
        prop_assert!(seqs.windows(2).all(|w| w[1] == w[0] + 1));
        prop_assert_eq!(seqs.last().copied(), Some(appends as u64 - 1));
    }
}
