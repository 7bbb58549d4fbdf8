//! # advisor-orchestrator
//!
//! The request pipeline every user query runs through.
//!
//! ```text
//! Request ─► classify ─► dispatch ─► assemble ─► gate ─► ResponseEnvelope
//!               │           │                      │
//!   ConversationLog    HandlerTable          ComplianceGate
//!   (history window)   (timeout + cancel)    (never skipped)
//! ```
//!
//! Handler failures, timeouts and cancellation become flagged degraded
//! outputs that still pass the gate. Only a fatal internal fault is returned
//! as an error.

pub mod classifier;
pub mod envelope;
pub mod orchestrator;
pub mod state;
pub mod table;

pub use classifier::{Classification, IntentClassifier};
pub use envelope::ResponseEnvelope;
pub use orchestrator::Orchestrator;
pub use state::{IllegalTransition, PipelineState, PipelineTrace};
pub use table::HandlerTable;
