use advisor_core::config::*;
use advisor_core::models::DataClass;
use advisor_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = AdvisorConfig::from_toml("").unwrap();

    // Retrieval defaults
    assert_eq!(config.retrieval.chunk_size, 512);
    assert_eq!(config.retrieval.chunk_overlap, 100);
    assert_eq!(config.retrieval.default_k, 5);
    assert_eq!(config.retrieval.lexical_weight, 0.6);
    assert_eq!(config.retrieval.vector_weight, 0.4);
    assert_eq!(config.retrieval.overlap_bonus, 0.1);

    // Gateway defaults
    assert_eq!(config.gateway.quote_ttl_secs, 60);
    assert_eq!(config.gateway.news_ttl_secs, 900);
    assert_eq!(config.gateway.max_attempts, 2);
    assert_eq!(config.gateway.fetch_concurrency, 4);

    // Compliance defaults
    assert_eq!(config.compliance.default_jurisdiction, "US");
    assert!(config.compliance.append_footer);

    // Orchestrator defaults
    assert_eq!(config.orchestrator.confidence_threshold, 0.1);
    assert_eq!(config.orchestrator.request_timeout_ms, 10_000);

    // Session defaults
    assert_eq!(config.session.max_turns, 50);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[retrieval]
chunk_size = 256
chunk_overlap = 32

[gateway]
quote_ttl_secs = 15
"#;
    let config = AdvisorConfig::from_toml(toml).unwrap();
    assert_eq!(config.retrieval.chunk_size, 256);
    assert_eq!(config.retrieval.chunk_overlap, 32);
    // Non-overridden fields keep defaults
    assert_eq!(config.retrieval.default_k, 5);
    assert_eq!(config.gateway.quote_ttl_secs, 15);
    assert_eq!(config.gateway.news_ttl_secs, 900);
}

#[test]
fn ttl_is_per_data_class() {
    let config = GatewayConfig {
        quote_ttl_secs: 5,
        news_ttl_secs: 50,
        fundamentals_ttl_secs: 500,
        ..Default::default()
    };
    assert_eq!(config.ttl_for(DataClass::Quote).as_secs(), 5);
    assert_eq!(config.ttl_for(DataClass::News).as_secs(), 50);
    assert_eq!(config.ttl_for(DataClass::Fundamentals).as_secs(), 500);
}

#[test]
fn overlap_not_smaller_than_chunk_size_is_rejected() {
    let toml = r#"
[retrieval]
chunk_size = 100
chunk_overlap = 100
"#;
    let err = AdvisorConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("chunk_overlap"));
}

#[test]
fn threshold_outside_unit_interval_is_rejected() {
    let toml = r#"
[orchestrator]
confidence_threshold = 1.5
"#;
    assert!(AdvisorConfig::from_toml(toml).is_err());
}

#[test]
fn negative_fusion_weight_is_rejected() {
    let mut config = AdvisorConfig::default();
    config.retrieval.vector_weight = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn zero_attempts_is_rejected() {
    let mut config = AdvisorConfig::default();
    config.gateway.max_attempts = 0;
    assert!(config.validate().is_err());
}

#[test]
fn malformed_toml_reports_parse_error() {
    let err = AdvisorConfig::from_toml("[retrieval\nchunk_size = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }) || err.to_string().contains("parse"));
}

#[test]
fn missing_file_reports_io_error() {
    let err = AdvisorConfig::load("/definitely/not/here/advisor.toml").unwrap_err();
    assert!(err.to_string().contains("advisor.toml"));
}

#[test]
fn config_round_trips_through_toml() {
    let config = AdvisorConfig::default();
    let raw = toml::to_string(&config).unwrap();
    let back = AdvisorConfig::from_toml(&raw).unwrap();
    assert_eq!(back.retrieval.chunk_size, config.retrieval.chunk_size);
    assert_eq!(back.gateway.latency_budget_ms, config.gateway.latency_budget_ms);
}
