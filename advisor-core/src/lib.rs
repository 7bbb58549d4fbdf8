//! # advisor-core
//!
//! Foundation crate for the advisor request pipeline.
//! Defines all shared types, traits, errors, config, and intents.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AdvisorConfig;
pub use errors::{AdvisorError, AdvisorResult};
pub use intent::Intent;
pub use models::{
    DataClass, Freshness, HandlerOutput, RequestContext, ResponseFlag, RetrievalResult, Verdict,
};
