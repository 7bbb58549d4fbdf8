//! # advisor-handlers
//!
//! One handler per intent, all behind the [`IHandler`] capability.
//!
//! ```text
//! DispatchContext ─┬─► TutorHandler     ── RetrievalEngine (level filter → unfiltered)
//!                  ├─► PortfolioHandler ── IPortfolioAnalytics + RetrievalEngine (topic)
//!                  └─► MarketHandler    ── DataGateway (quotes: fetch_many, news: fetch)
//! ```
//!
//! Handlers never touch shared state except through the stores handed to
//! them in the [`DispatchContext`].

pub mod context;
pub mod format;
pub mod handler;
pub mod market;
pub mod portfolio;
pub mod registry;
pub mod tutor;

pub use context::DispatchContext;
pub use handler::IHandler;
pub use market::MarketHandler;
pub use portfolio::{PortfolioHandler, StructuralAnalytics};
pub use registry::default_handlers;
pub use tutor::TutorHandler;
