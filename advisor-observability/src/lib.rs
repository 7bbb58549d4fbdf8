//! # advisor-observability
//!
//! Structured tracing setup with span and event definitions, per-pipeline
//! metrics, and degradation event tracking with alerting.

pub mod degradation;
pub mod engine;
pub mod metrics;
pub mod tracing_setup;

pub use engine::ObservabilityEngine;
pub use metrics::{MetricsSnapshot, PipelineMetrics};
