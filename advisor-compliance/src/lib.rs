//! # advisor-compliance
//!
//! The compliance gate every outbound response passes through.
//!
//! ```text
//! text ─► footer::split ─► body ──► patterns::scan_all ──► drop protected spans
//!                            │                                   │
//!                            │                     flags ◄───────┤
//!                            │                                   ▼
//!                            │                       apply_replacements
//!                            ▼                                   │
//!                  existing footer ──► merge ◄── DisclaimerPolicy│
//!                                        │                       │
//!                                        └──► footer::render ◄───┘
//! ```
//!
//! Blocking categories (prohibited phrases, return promises) are replaced by
//! a suppression marker and make the verdict unapproved. Directive advice is
//! softened. Recommendations and pressure language only add disclaimers.
//! Source attributions are never touched.

pub mod degradation;
pub mod disclaimers;
pub mod engine;
pub mod footer;
pub mod patterns;

pub use degradation::DegradationTracker;
pub use disclaimers::DisclaimerPolicy;
pub use engine::ComplianceGate;
pub use patterns::REMOVED_MARKER;
