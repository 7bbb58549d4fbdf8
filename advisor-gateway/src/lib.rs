//! # advisor-gateway
//!
//! Cache-aside access to volatile external data (quotes, news,
//! fundamentals) with per-class TTLs, retry with backoff, provider fallback,
//! circuit breakers, a global rate limit, single-flight deduplication, and
//! stale serving when upstream fails.
//!
//! ## Architecture
//!
//! ```text
//! DataGateway
//! ├── MarketCache (moka, per-entry TTL, stale retention)
//! ├── SingleFlight (one upstream call per key at a time)
//! ├── ProviderChain (primary → fallback)
//! │   ├── RetryPolicy (bounded exponential backoff)
//! │   ├── CircuitBreaker (per provider)
//! │   └── RateLimiter (global call spacing)
//! └── Providers
//!     ├── HttpJsonProvider (URL template, reqwest)
//!     └── StaticProvider (in-memory)
//! ```

pub mod breaker;
pub mod cache;
pub mod degradation;
pub mod gateway;
pub mod providers;
pub mod rate_limit;
pub mod retry;
pub mod single_flight;

pub use breaker::{BreakerState, CircuitBreaker};
pub use degradation::ProviderChain;
pub use gateway::{DataGateway, GatewayStats};
pub use providers::{HttpJsonProvider, StaticProvider};
pub use retry::RetryPolicy;
