use advisor_core::config::ComplianceConfig;
use advisor_core::models::{ComplianceFlag, Modification, Verdict};
use advisor_core::traits::IComplianceReviewer;
use advisor_core::Intent;
use tracing::{debug, info, warn};

use crate::degradation::DegradationTracker;
use crate::disclaimers::DisclaimerPolicy;
use crate::footer::{self, Footer};
use crate::patterns::{self, protected, CustomPhrase, RawMatch};

/// Stateless reviewer applied to every outbound response.
///
/// Suppresses blocking content, softens directive advice, and renders the
/// disclaimers and risk warnings that apply into a footer. Reviewing its own
/// output changes nothing.
pub struct ComplianceGate {
    config: ComplianceConfig,
    policy: DisclaimerPolicy,
    custom: Vec<CustomPhrase>,
    health: DegradationTracker,
}

impl ComplianceGate {
    pub fn new(config: ComplianceConfig) -> Self {
        let mut health = DegradationTracker::new();
        check_pattern_health(&mut health);

        let mut custom = Vec::with_capacity(config.extra_prohibited_phrases.len());
        for phrase in &config.extra_prohibited_phrases {
            if phrase.trim().is_empty() {
                continue;
            }
            match CustomPhrase::compile(phrase) {
                Ok(p) => custom.push(p),
                Err(e) => {
                    warn!(phrase = %phrase, error = %e, "custom prohibited phrase skipped");
                    health.record_failure(
                        phrase,
                        ComplianceFlag::ProhibitedContent,
                        &e.to_string(),
                    );
                }
            }
        }

        Self {
            policy: DisclaimerPolicy::from_config(&config),
            config,
            custom,
            health,
        }
    }

    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    pub fn policy(&self) -> &DisclaimerPolicy {
        &self.policy
    }

    /// Patterns the gate is running without.
    pub fn pattern_health(&self) -> &DegradationTracker {
        &self.health
    }

    /// Review without intent-specific disclaimers.
    pub fn review_text(&self, text: &str, jurisdiction: &str) -> Verdict {
        self.review_with_tracking(text, jurisdiction, None).0
    }

    /// Review and return the pattern health alongside the verdict so callers
    /// can audit any gaps.
    pub fn review_with_tracking(
        &self,
        text: &str,
        jurisdiction: &str,
        intent: Option<Intent>,
    ) -> (Verdict, DegradationTracker) {
        let resolved = self.policy.resolve(jurisdiction);
        if resolved.fallback {
            warn!(
                requested = jurisdiction,
                applied = %resolved.code,
                "unknown jurisdiction, using default policy"
            );
        }

        let (body, existing) = footer::split(text);
        let guarded = protected::spans(body);
        let live: Vec<RawMatch> = patterns::scan_all(body, &self.custom)
            .into_iter()
            .filter(|m| !protected::overlaps(&guarded, m.start, m.end))
            .collect();

        let mut flags: Vec<ComplianceFlag> = live.iter().map(|m| m.flag).collect();
        if resolved.fallback {
            flags.push(ComplianceFlag::JurisdictionFallback);
        }
        flags.sort();
        flags.dedup();

        let (rewritten, modifications) = apply_replacements(body, &patterns::edits(&live));

        let existing = existing.unwrap_or_default();
        let fresh_disclaimers = self.policy.disclaimers(&resolved.code, intent, &flags);
        let fresh_warnings = self.policy.risk_warnings(intent);
        let merged = Footer {
            disclaimers: footer::merge(&existing.disclaimers, &fresh_disclaimers, |d| {
                self.policy.disclaimer_rank(d)
            }),
            risk_warnings: footer::merge(&existing.risk_warnings, &fresh_warnings, |w| {
                self.policy.warning_rank(w)
            }),
        };

        let final_text = if self.config.append_footer {
            footer::render(&rewritten, &merged)
        } else if existing.is_empty() {
            rewritten
        } else {
            footer::render(&rewritten, &existing)
        };

        let approved = !flags.iter().any(ComplianceFlag::is_blocking);
        for m in &modifications {
            debug!(flag = m.flag.as_str(), offset = m.offset, "compliance rewrite");
        }
        info!(
            jurisdiction = %resolved.code,
            intent = intent.map(Intent::as_str).unwrap_or("none"),
            flags = ?flags.iter().map(ComplianceFlag::as_str).collect::<Vec<_>>(),
            modifications = modifications.len(),
            approved,
            "compliance applied"
        );

        let verdict = Verdict {
            text: final_text,
            approved,
            modifications,
            flags,
            disclaimers: merged.disclaimers,
            risk_warnings: merged.risk_warnings,
            jurisdiction: resolved.code,
        };
        (verdict, self.health.clone())
    }
}

impl Default for ComplianceGate {
    fn default() -> Self {
        Self::new(ComplianceConfig::default())
    }
}

impl IComplianceReviewer for ComplianceGate {
    fn review(&self, text: &str, jurisdiction: &str, intent: Option<Intent>) -> Verdict {
        self.review_with_tracking(text, jurisdiction, intent).0
    }
}

fn check_pattern_health(tracker: &mut DegradationTracker) {
    for pat in patterns::builtin_patterns() {
        if pat.regex.is_none() {
            warn!(pattern = pat.name, "compliance pattern failed to compile");
            tracker.record_failure(pat.name, pat.flag, "regex compilation failed");
        }
    }
}

/// Apply edits to `text`. Edits must be non-overlapping and sorted by start
/// position descending so replacements don't shift earlier offsets.
/// Returns the rewritten text and the modifications in reading order.
fn apply_replacements(text: &str, edits: &[RawMatch]) -> (String, Vec<Modification>) {
    let mut result = text.to_string();
    let mut modifications = Vec::with_capacity(edits.len());
    for m in edits {
        let Some(replacement) = m.replacement.as_deref() else { continue };
        if m.end > result.len() {
            continue;
        }
        let original = &result[m.start..m.end];
        // Already-replaced text.
        if original.starts_with('[') && original.ends_with(']') {
            continue;
        }
        if original == replacement {
            continue;
        }
        modifications.push(Modification {
            flag: m.flag,
            original: original.to_string(),
            replacement: replacement.to_string(),
            offset: m.start,
        });
        result.replace_range(m.start..m.end, replacement);
    }
    modifications.reverse();
    (result, modifications)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacements_apply_from_the_end() {
        let gate = ComplianceGate::default();
        let v = gate.review_text("You should hold. It is a safe bet.", "US");
        let body = footer::split(&v.text).0;
        assert_eq!(
            body,
            "One might consider hold. It is a [content removed for compliance]."
        );
        assert_eq!(v.modifications.len(), 2);
        assert!(v.modifications[0].offset < v.modifications[1].offset);
    }

    #[test]
    fn footer_disabled_keeps_text_bare() {
        let gate = ComplianceGate::new(ComplianceConfig {
            append_footer: false,
            ..Default::default()
        });
        let v = gate.review_text("Bonds pay coupons.", "US");
        assert_eq!(v.text, "Bonds pay coupons.");
        assert_eq!(v.disclaimers.len(), 1);
        assert_eq!(v.risk_warnings.len(), 4);
    }

    #[test]
    fn builtin_patterns_are_healthy() {
        assert!(!ComplianceGate::default().pattern_health().has_failures());
    }
}
