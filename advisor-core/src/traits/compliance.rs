use crate::intent::Intent;
use crate::models::Verdict;

/// Final review of outbound text. Has no failure mode.
pub trait IComplianceReviewer: Send + Sync {
    /// Review `text` under `jurisdiction`. `intent` selects intent-specific
    /// disclaimers and warnings.
    fn review(&self, text: &str, jurisdiction: &str, intent: Option<Intent>) -> Verdict;
}
