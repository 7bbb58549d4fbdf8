//! Pattern health for the compliance gate.
//!
//! A pattern that fails to compile is skipped with a warning and the gate
//! keeps working with the rest. The tracker records the gap so callers can
//! tell a clean verdict from one produced with fewer patterns.

use advisor_core::models::ComplianceFlag;

/// A pattern the gate is running without.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFailure {
    pub pattern_name: String,
    /// Category the pattern would have raised.
    pub flag: ComplianceFlag,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    failures: Vec<PatternFailure>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_failure(&mut self, pattern_name: &str, flag: ComplianceFlag, error: &str) {
        self.failures.push(PatternFailure {
            pattern_name: pattern_name.to_string(),
            flag,
            error: error.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[PatternFailure] {
        &self.failures
    }

    /// Whether any pattern of `flag`'s category is missing.
    pub fn is_degraded(&self, flag: ComplianceFlag) -> bool {
        self.failures.iter().any(|f| f.flag == flag)
    }
}
