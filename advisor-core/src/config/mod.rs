pub mod compliance_config;
pub mod defaults;
pub mod gateway_config;
pub mod observability_config;
pub mod orchestrator_config;
pub mod retrieval_config;
pub mod session_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use compliance_config::ComplianceConfig;
pub use gateway_config::GatewayConfig;
pub use observability_config::ObservabilityConfig;
pub use orchestrator_config::OrchestratorConfig;
pub use retrieval_config::RetrievalConfig;
pub use session_config::SessionConfig;

use crate::errors::ConfigError;

/// Top-level configuration, one section per subsystem.
///
/// Every section is `#[serde(default)]`, so an empty TOML document yields a
/// fully populated config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub retrieval: RetrievalConfig,
    pub gateway: GatewayConfig,
    pub compliance: ComplianceConfig,
    pub orchestrator: OrchestratorConfig,
    pub session: SessionConfig,
    pub observability: ObservabilityConfig,
}

impl AdvisorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Reject combinations that would make a subsystem misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.retrieval;
        if r.chunk_size == 0 {
            return Err(invalid("retrieval.chunk_size", "must be positive"));
        }
        if r.chunk_overlap >= r.chunk_size {
            return Err(invalid(
                "retrieval.chunk_overlap",
                "must be smaller than chunk_size",
            ));
        }
        if r.default_k == 0 {
            return Err(invalid("retrieval.default_k", "must be positive"));
        }
        if r.candidate_multiplier == 0 {
            return Err(invalid("retrieval.candidate_multiplier", "must be positive"));
        }
        for (field, weight) in [
            ("retrieval.lexical_weight", r.lexical_weight),
            ("retrieval.vector_weight", r.vector_weight),
            ("retrieval.overlap_bonus", r.overlap_bonus),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }
        if r.lexical_weight + r.vector_weight + r.overlap_bonus <= 0.0 {
            return Err(invalid("retrieval", "fusion weights must not all be zero"));
        }
        if r.embedding_dimensions == 0 {
            return Err(invalid("retrieval.embedding_dimensions", "must be positive"));
        }

        let g = &self.gateway;
        if g.max_attempts == 0 {
            return Err(invalid("gateway.max_attempts", "must be at least 1"));
        }
        if g.fetch_concurrency == 0 {
            return Err(invalid("gateway.fetch_concurrency", "must be positive"));
        }
        if !(g.backoff_multiplier.is_finite() && g.backoff_multiplier >= 1.0) {
            return Err(invalid("gateway.backoff_multiplier", "must be >= 1.0"));
        }
        if g.breaker_failure_threshold == 0 {
            return Err(invalid(
                "gateway.breaker_failure_threshold",
                "must be at least 1",
            ));
        }

        let o = &self.orchestrator;
        if !(0.0..=1.0).contains(&o.confidence_threshold) {
            return Err(invalid(
                "orchestrator.confidence_threshold",
                "must be within [0, 1]",
            ));
        }
        if o.retrieval_k == 0 {
            return Err(invalid("orchestrator.retrieval_k", "must be positive"));
        }

        if self.session.max_turns == 0 {
            return Err(invalid("session.max_turns", "must be positive"));
        }

        if self.compliance.default_jurisdiction.trim().is_empty() {
            return Err(invalid(
                "compliance.default_jurisdiction",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
