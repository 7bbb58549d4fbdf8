//! Disclaimer and risk-warning catalog.

use std::collections::BTreeMap;

use advisor_core::config::ComplianceConfig;
use advisor_core::models::ComplianceFlag;
use advisor_core::Intent;

pub const US_DISCLAIMER: &str = "This information is for educational purposes only and should not be considered as investment advice.";
pub const UK_DISCLAIMER: &str = "This information is for general educational purposes only and does not constitute financial advice or a personal recommendation. The value of investments can fall as well as rise.";
pub const EU_DISCLAIMER: &str = "This information is for educational purposes only and does not constitute investment advice or a personal recommendation.";
pub const CA_DISCLAIMER: &str = "This information is for educational purposes only and is not investment, tax, or legal advice.";
pub const AU_DISCLAIMER: &str = "This information is general in nature and does not take into account your objectives, financial situation, or needs.";

pub const PORTFOLIO_DISCLAIMER: &str = "Portfolio analysis is for educational purposes only. Past performance does not guarantee future results.";
pub const MARKET_DISCLAIMER: &str = "Market data and analysis are for informational purposes only and should not be considered as investment advice.";

pub const ADVICE_DISCLAIMER: &str = "This response is for educational purposes only and should not be considered as personalized investment advice.";
pub const RECOMMENDATION_DISCLAIMER: &str = "Any investment examples are for educational purposes only and should not be considered as recommendations.";
pub const NO_GUARANTEE_DISCLAIMER: &str = "No investment can guarantee returns. All investments carry risk.";
pub const TIME_PRESSURE_DISCLAIMER: &str = "Investment decisions should not be made under time pressure. Take the time to review any decision carefully.";

pub const BASE_RISK_WARNINGS: [&str; 4] = [
    "Investing involves risk, including the potential loss of principal.",
    "Past performance does not guarantee future results.",
    "Diversification does not ensure a profit or protect against loss.",
    "Consider your investment objectives and risk tolerance before investing.",
];
pub const PORTFOLIO_RISK_WARNING: &str = "Portfolio analysis is based on historical data and may not reflect future performance.";
pub const MARKET_RISK_WARNING: &str = "Market data is subject to change and may not be current at the time of your decision.";

fn intent_disclaimer(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::Tutor => None,
        Intent::Portfolio => Some(PORTFOLIO_DISCLAIMER),
        Intent::Market => Some(MARKET_DISCLAIMER),
    }
}

fn intent_warning(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::Tutor => None,
        Intent::Portfolio => Some(PORTFOLIO_RISK_WARNING),
        Intent::Market => Some(MARKET_RISK_WARNING),
    }
}

fn flag_disclaimer(flag: ComplianceFlag) -> Option<&'static str> {
    match flag {
        ComplianceFlag::PersonalizedAdvice => Some(ADVICE_DISCLAIMER),
        ComplianceFlag::InvestmentRecommendation => Some(RECOMMENDATION_DISCLAIMER),
        ComplianceFlag::ProhibitedContent | ComplianceFlag::ReturnPromise => {
            Some(NO_GUARANTEE_DISCLAIMER)
        }
        ComplianceFlag::TimeSensitive => Some(TIME_PRESSURE_DISCLAIMER),
        ComplianceFlag::JurisdictionFallback => None,
    }
}

/// A jurisdiction code resolved against the known policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub code: String,
    /// The requested code was unknown and the default policy applies.
    pub fallback: bool,
}

/// Base disclaimers per jurisdiction plus the fixed intent and flag tables.
#[derive(Debug, Clone)]
pub struct DisclaimerPolicy {
    base: BTreeMap<String, String>,
    default_jurisdiction: String,
}

impl DisclaimerPolicy {
    /// Built-in jurisdictions, overridden or extended by the config.
    pub fn from_config(config: &ComplianceConfig) -> Self {
        let mut base: BTreeMap<String, String> = [
            ("US", US_DISCLAIMER),
            ("UK", UK_DISCLAIMER),
            ("EU", EU_DISCLAIMER),
            ("CA", CA_DISCLAIMER),
            ("AU", AU_DISCLAIMER),
        ]
        .into_iter()
        .map(|(code, text)| (code.to_string(), text.to_string()))
        .collect();

        for (code, text) in &config.jurisdiction_disclaimers {
            let text = single_line(text);
            if !text.is_empty() {
                base.insert(normalize_code(code), text);
            }
        }

        let mut default_jurisdiction = normalize_code(&config.default_jurisdiction);
        if !base.contains_key(&default_jurisdiction) {
            default_jurisdiction = "US".to_string();
        }

        Self {
            base,
            default_jurisdiction,
        }
    }

    pub fn default_jurisdiction(&self) -> &str {
        &self.default_jurisdiction
    }

    pub fn known_jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.base.keys().map(String::as_str)
    }

    pub fn resolve(&self, jurisdiction: &str) -> Resolved {
        let code = normalize_code(jurisdiction);
        if self.base.contains_key(&code) {
            Resolved {
                code,
                fallback: false,
            }
        } else {
            Resolved {
                code: self.default_jurisdiction.clone(),
                fallback: true,
            }
        }
    }

    /// Disclaimers for a resolved jurisdiction, intent, and flag set, in
    /// canonical order.
    pub fn disclaimers(
        &self,
        code: &str,
        intent: Option<Intent>,
        flags: &[ComplianceFlag],
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let base = self
            .base
            .get(code)
            .or_else(|| self.base.get(&self.default_jurisdiction));
        if let Some(base) = base {
            out.push(base.clone());
        }
        if let Some(text) = intent.and_then(intent_disclaimer) {
            out.push(text.to_string());
        }
        for text in flags.iter().filter_map(|f| flag_disclaimer(*f)) {
            if !out.iter().any(|d| d == text) {
                out.push(text.to_string());
            }
        }
        out.sort_by_key(|d| self.disclaimer_rank(d));
        out
    }

    pub fn risk_warnings(&self, intent: Option<Intent>) -> Vec<String> {
        let mut out: Vec<String> = BASE_RISK_WARNINGS.iter().map(|w| w.to_string()).collect();
        if let Some(text) = intent.and_then(intent_warning) {
            out.push(text.to_string());
        }
        out
    }

    /// Position in the canonical order. Unknown text sorts last.
    pub fn disclaimer_rank(&self, text: &str) -> usize {
        if self.base.values().any(|b| b == text) {
            return 0;
        }
        if let Some(i) = Intent::ALL
            .iter()
            .position(|i| intent_disclaimer(*i) == Some(text))
        {
            return 1 + i;
        }
        if let Some(i) = FLAG_ORDER
            .iter()
            .position(|f| flag_disclaimer(*f) == Some(text))
        {
            return 1 + Intent::COUNT + i;
        }
        usize::MAX
    }

    pub fn warning_rank(&self, text: &str) -> usize {
        if let Some(i) = BASE_RISK_WARNINGS.iter().position(|w| *w == text) {
            return i;
        }
        if let Some(i) = Intent::ALL
            .iter()
            .position(|i| intent_warning(*i) == Some(text))
        {
            return BASE_RISK_WARNINGS.len() + i;
        }
        usize::MAX
    }
}

const FLAG_ORDER: [ComplianceFlag; 6] = [
    ComplianceFlag::ProhibitedContent,
    ComplianceFlag::ReturnPromise,
    ComplianceFlag::PersonalizedAdvice,
    ComplianceFlag::InvestmentRecommendation,
    ComplianceFlag::TimeSensitive,
    ComplianceFlag::JurisdictionFallback,
];

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Footer items are one line each.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> DisclaimerPolicy {
        DisclaimerPolicy::from_config(&ComplianceConfig::default())
    }

    #[test]
    fn known_codes_resolve_case_insensitively() {
        let r = policy().resolve(" uk ");
        assert_eq!(r.code, "UK");
        assert!(!r.fallback);
    }

    #[test]
    fn unknown_code_falls_back_to_default() {
        let r = policy().resolve("ZZ");
        assert_eq!(r.code, "US");
        assert!(r.fallback);
    }

    #[test]
    fn config_overrides_base_disclaimer() {
        let mut cfg = ComplianceConfig::default();
        cfg.jurisdiction_disclaimers
            .insert("sg".to_string(), "Not advice in\nSingapore.".to_string());
        let policy = DisclaimerPolicy::from_config(&cfg);
        assert!(!policy.resolve("SG").fallback);
        let d = policy.disclaimers("SG", None, &[]);
        assert_eq!(d, vec!["Not advice in Singapore."]);
    }

    #[test]
    fn disclaimers_follow_canonical_order() {
        let d = policy().disclaimers(
            "US",
            Some(Intent::Market),
            &[
                ComplianceFlag::TimeSensitive,
                ComplianceFlag::PersonalizedAdvice,
            ],
        );
        assert_eq!(
            d,
            vec![
                US_DISCLAIMER,
                MARKET_DISCLAIMER,
                ADVICE_DISCLAIMER,
                TIME_PRESSURE_DISCLAIMER
            ]
        );
    }

    #[test]
    fn blocking_flags_share_one_disclaimer() {
        let d = policy().disclaimers(
            "US",
            None,
            &[ComplianceFlag::ProhibitedContent, ComplianceFlag::ReturnPromise],
        );
        assert_eq!(d.iter().filter(|s| *s == NO_GUARANTEE_DISCLAIMER).count(), 1);
    }

    #[test]
    fn intent_adds_one_risk_warning() {
        let p = policy();
        assert_eq!(p.risk_warnings(None).len(), 4);
        assert_eq!(p.risk_warnings(Some(Intent::Tutor)).len(), 4);
        assert_eq!(p.risk_warnings(Some(Intent::Portfolio)).len(), 5);
    }
}
