pub mod taxonomy;

pub use taxonomy::Intent;
