//! Data providers.
//!
//! Chain order is caller-defined; a typical deployment is
//! 1. HttpJsonProvider (vendor API, primary)
//! 2. HttpJsonProvider (second vendor, fallback)
//! 3. StaticProvider (offline snapshot, last resort)

pub mod http_provider;
pub mod static_provider;

pub use http_provider::HttpJsonProvider;
pub use static_provider::StaticProvider;
