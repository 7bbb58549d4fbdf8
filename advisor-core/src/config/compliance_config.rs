use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Compliance gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Jurisdiction whose policy applies to unknown jurisdiction codes.
    pub default_jurisdiction: String,
    /// Render disclaimers and risk warnings into the reviewed text.
    pub append_footer: bool,
    /// Additional blocking phrases on top of the built-in list.
    pub extra_prohibited_phrases: Vec<String>,
    /// Per-jurisdiction base disclaimer overrides, keyed by uppercase code.
    pub jurisdiction_disclaimers: BTreeMap<String, String>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: defaults::DEFAULT_JURISDICTION.to_string(),
            append_footer: defaults::DEFAULT_APPEND_FOOTER,
            extra_prohibited_phrases: Vec::new(),
            jurisdiction_disclaimers: BTreeMap::new(),
        }
    }
}
