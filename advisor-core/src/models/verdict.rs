use serde::{Deserialize, Serialize};

/// Content categories detected by the compliance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceFlag {
    /// Blocking: phrases such as "guaranteed returns". Suppressed.
    ProhibitedContent,
    /// Blocking: promises of a specific return. Suppressed.
    ReturnPromise,
    /// Softened: directive, personalized advice.
    PersonalizedAdvice,
    /// Disclaimer only: buy/sell style recommendations.
    InvestmentRecommendation,
    /// Disclaimer only: pressure language.
    TimeSensitive,
    /// The requested jurisdiction is unknown; the default policy was used.
    JurisdictionFallback,
}

impl ComplianceFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProhibitedContent => "prohibited_content",
            Self::ReturnPromise => "return_promise",
            Self::PersonalizedAdvice => "personalized_advice",
            Self::InvestmentRecommendation => "investment_recommendation",
            Self::TimeSensitive => "time_sensitive",
            Self::JurisdictionFallback => "jurisdiction_fallback",
        }
    }

    /// Whether this category makes a response unapprovable as written.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::ProhibitedContent | Self::ReturnPromise)
    }
}

/// One rewrite applied by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub flag: ComplianceFlag,
    pub original: String,
    pub replacement: String,
    /// Byte offset of `original` in the reviewed text.
    pub offset: usize,
}

/// The gate's final word on a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Text to deliver.
    pub text: String,
    /// False when blocking content was found (and suppressed).
    pub approved: bool,
    pub modifications: Vec<Modification>,
    pub flags: Vec<ComplianceFlag>,
    pub disclaimers: Vec<String>,
    pub risk_warnings: Vec<String>,
    pub jurisdiction: String,
}

impl Verdict {
    pub fn is_modified(&self) -> bool {
        !self.modifications.is_empty()
    }

    pub fn has_flag(&self, flag: ComplianceFlag) -> bool {
        self.flags.contains(&flag)
    }
}
