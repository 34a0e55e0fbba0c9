// === PUBLIC CONTRACT ===
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

mod module;
pub use module::SessionBootstrap;

// === INTERNAL MODULES ===
// Exposed for wiring in the server binary and for integration tests.
// Other consumers should stick to `contract`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
