use advisor_core::config::SessionConfig;
use advisor_core::Intent;
use advisor_session::{cleanup_expired, ConversationLog};

fn log(max_turns: usize) -> ConversationLog {
    ConversationLog::new(SessionConfig {
        max_turns,
        ..Default::default()
    })
}

// ── Append and read back ──────────────────────────────────────────────────

#[test]
fn append_then_history_is_oldest_first() {
    let log = log(10);
    log.append("c1", "what is a bond?", Some(Intent::Tutor), "A bond is a loan.");
    log.append("c1", "price of SPY", Some(Intent::Market), "SPY is up.");

    let history = log.history("c1");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].query, "what is a bond?");
    assert_eq!(history[1].intent, Some(Intent::Market));
    assert!(history[0].seq < history[1].seq);
}

#[test]
fn unknown_conversation_reads_empty() {
    let log = log(10);
    assert!(log.history("missing").is_empty());
    assert!(log.recent("missing", 3).is_empty());
    let page = log.page("missing", 0, 5);
    assert!(page.turns.is_empty());
    assert_eq!(page.total, 0);
    assert!(!page.has_more);
}

#[test]
fn conversations_are_isolated() {
    let log = log(10);
    log.append("a", "q", None, "r");
    log.append("b", "q", None, "r");
    log.append("b", "q", None, "r");
    assert_eq!(log.history("a").len(), 1);
    assert_eq!(log.history("b").len(), 2);
    assert_eq!(log.conversation_count(), 2);
}

// ── Eviction ──────────────────────────────────────────────────────────────

#[test]
fn bound_evicts_oldest_and_seq_keeps_growing() {
    let log = log(3);
    for i in 0..7 {
        log.append("c", &format!("q{i}"), None, "r");
    }
    let history = log.history("c");
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].query, "q4");
    assert_eq!(history[2].seq, 6);
    assert_eq!(log.evicted_turns("c"), 4);

    let analytics = log.analytics("c").unwrap();
    assert_eq!(analytics.total(), 7);
}

#[test]
fn recent_returns_tail_in_order() {
    let log = log(10);
    for i in 0..5 {
        log.append("c", &format!("q{i}"), None, "r");
    }
    let recent: Vec<String> = log.recent("c", 2).into_iter().map(|t| t.query).collect();
    assert_eq!(recent, vec!["q3", "q4"]);
    assert_eq!(log.recent("c", 50).len(), 5);
}

// ── Pagination ────────────────────────────────────────────────────────────

#[test]
fn pages_cover_history_without_gaps() {
    let log = log(50);
    for i in 0..11 {
        log.append("c", &format!("q{i}"), None, "r");
    }
    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let page = log.page("c", offset, 4);
        assert_eq!(page.total, 11);
        seen.extend(page.turns.iter().map(|t| t.seq));
        offset += page.turns.len();
        if !page.has_more {
            break;
        }
    }
    let expected: Vec<u64> = (0..11).rev().collect();
    assert_eq!(seen, expected);
}

// ── Clear and cleanup ─────────────────────────────────────────────────────

#[test]
fn clear_removes_conversation() {
    let log = log(10);
    log.append("c", "q", None, "r");
    assert!(log.clear("c"));
    assert!(!log.clear("c"));
    assert!(log.history("c").is_empty());
}

#[test]
fn cleanup_idle_respects_timeout() {
    let log = log(10);
    log.append("a", "q", None, "r");
    log.append("b", "q", None, "r");

    assert_eq!(log.cleanup_idle(chrono::Duration::hours(1)), 0);
    assert_eq!(cleanup_expired(&log), 0);
    assert_eq!(log.conversation_count(), 2);

    assert_eq!(log.cleanup_idle(chrono::Duration::zero()), 2);
    assert_eq!(log.conversation_count(), 0);
}

// ── Concurrent access via DashMap ─────────────────────────────────────────

#[test]
fn concurrent_appends_do_not_lose_turns() {
    use std::thread;

    let log = log(1_000);
    let mut handles = vec![];
    for i in 0..4 {
        let log = log.clone();
        handles.push(thread::spawn(move || {
            for j in 0..100 {
                log.append("shared", &format!("t{i}-{j}"), None, "r");
                log.append(&format!("own{i}"), "q", Some(Intent::Tutor), "r");
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let shared = log.history("shared");
    assert_eq!(shared.len(), 400);
    let mut seqs: Vec<u64> = shared.iter().map(|t| t.seq).collect();
    seqs.dedup();
    assert_eq!(seqs.len(), 400, "sequence numbers must be unique");
    for i in 0..4 {
        assert_eq!(log.history(&format!("own{i}")).len(), 100);
    }
}
